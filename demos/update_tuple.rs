// Guest example: encode a row, insert it and bump a field.
//
// The codec part always works; the storage part needs an embedding
// Tarantool process behind `host::attach`. Run standalone, this example
// attaches the inert host and shows the boundary reporting
// not-implemented instead.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tarlink::{Config, NullHost, Space, host, msgpack};

fn main() -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_default();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The codec runs on the guest side and needs no host.
    let row = msgpack::encode(br#"[1,"Alice",25]"#)?;
    let echoed = msgpack::decode(&row)?;
    tracing::info!(bytes = row.len(), row = %String::from_utf8_lossy(&echoed), "codec round-trip");

    host::attach(Arc::new(NullHost));

    match run_scenario(&config, &row) {
        Ok(Some(updated)) => tracing::info!(tuple = %updated, "updated tuple"),
        Ok(None) => tracing::warn!("no tuple matched the key"),
        Err(err) => tracing::warn!(%err, "boundary is inert without an embedder"),
    }

    Ok(())
}

fn run_scenario(config: &Config, row: &[u8]) -> tarlink::BoxResult<Option<String>> {
    let space = Space::find("test_space")?;
    space.insert(row)?;

    let index = space.index_with_base("primary", config.boundary.index_base)?;
    let key = msgpack::encode(b"[1]").map_err(codec_err)?;
    let ops = msgpack::encode(br#"[["=",2,26]]"#).map_err(codec_err)?;

    match index.update(&key, &ops)? {
        Some(updated) => {
            let json = msgpack::decode(&updated.to_vec()?).map_err(codec_err)?;
            Ok(Some(String::from_utf8_lossy(&json).into_owned()))
        }
        None => Ok(None),
    }
}

fn codec_err(err: tarlink::MsgpackError) -> tarlink::BoxError {
    tarlink::BoxError::new(err.to_string(), "ClientError", tarlink::error::ER_ILLEGAL_PARAMS)
}
