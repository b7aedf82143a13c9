//! The TCP accept loop for the command transport.

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, error, info, warn};

use authhub_core::config::CommandConfig;
use authhub_core::error::AppError;
use authhub_core::result::AppResult;

use crate::dispatch::{self, CommandContext};
use crate::envelope::CommandRequest;

/// Serves `{cmd, payload}` frames over newline-delimited JSON.
///
/// Connections are handled concurrently; each request on a connection is
/// processed in order and always answered, even when the frame or the
/// command is bad.
pub struct CommandServer {
    ctx: CommandContext,
    config: CommandConfig,
}

impl CommandServer {
    /// Create a server over the shared services.
    pub fn new(ctx: CommandContext, config: CommandConfig) -> Self {
        Self { ctx, config }
    }

    /// Bind and serve until the process exits.
    pub async fn run(self) -> AppResult<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind command port {addr}: {e}")))?;

        info!(addr = %addr, "Command transport listening");

        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    debug!(peer = %peer, "Command connection accepted");
                    let ctx = self.ctx.clone();
                    tokio::spawn(async move {
                        handle_connection(ctx, stream).await;
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept command connection");
                }
            }
        }
    }
}

/// Serve one connection: read frames, dispatch, write replies.
async fn handle_connection(ctx: CommandContext, stream: TcpStream) {
    let mut framed = Framed::new(stream, LinesCodec::new());

    while let Some(frame) = framed.next().await {
        let line = match frame {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Dropping command connection on read error");
                return;
            }
        };

        let reply = match CommandRequest::parse(&line) {
            Ok(request) => {
                debug!(cmd = %request.cmd, "Dispatching command");
                dispatch::handle(&ctx, request).await
            }
            Err(reply) => reply,
        };

        let encoded = match serde_json::to_string(&reply) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!(error = %e, "Failed to encode command reply");
                continue;
            }
        };

        if let Err(e) = framed.send(encoded).await {
            warn!(error = %e, "Dropping command connection on write error");
            return;
        }
    }
}
