#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::path::Path;

use args::{Args, Command};
use clap::Parser;
use faultline_config::Config;
use faultline_core::{ErrorCode, StructuredError, rpc_ordinal_to_http};
use faultline_server::Server;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load_or_default(&args.config)?;

    faultline_telemetry::init(&config.log)?;

    match args.command {
        Command::Explain { code } => print_json(&explain(ErrorCode::new(code))),
        Command::Decode { wire } => {
            let err = StructuredError::from_wire(wire.trim())?;
            print_json(&describe(&err));
        }
        Command::RpcToHttp { ordinal } => print_json(&serde_json::json!({
            "grpc_status": ordinal,
            "grpc_code": format!("{:?}", tonic::Code::from_i32(ordinal)),
            "http_status": rpc_ordinal_to_http(ordinal).as_u16(),
        })),
        Command::Serve { listen } => {
            if let Some(listen) = listen {
                config.server.listen_address = Some(listen);
            }
            serve(&config, &args.config).await?;
        }
    }

    Ok(())
}

async fn serve(config: &Config, config_path: &Path) -> anyhow::Result<()> {
    tracing::info!(
        config_path = %config_path.display(),
        "starting faultline"
    );

    let server = Server::new(config);

    // Set up graceful shutdown
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    server.serve(shutdown).await?;

    tracing::info!("faultline stopped");
    Ok(())
}

/// Everything a code translates to, as printed by `explain`
fn explain(code: ErrorCode) -> serde_json::Value {
    let mut value = describe(&StructuredError::from_code(code));
    value["registered"] = code.is_registered().into();
    value
}

fn describe(err: &StructuredError) -> serde_json::Value {
    let (status, body) = err.to_http_result();
    let rpc = err.code().rpc_code();

    serde_json::json!({
        "code": body.code,
        "message": body.msg,
        "internal_message": err.internal_message(),
        "level": err.level().to_string(),
        "http_status": status.as_u16(),
        "grpc_status": rpc as i32,
        "grpc_code": format!("{rpc:?}"),
        "wire": err.to_wire(),
    })
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("failed to render output: {e}"),
    }
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
