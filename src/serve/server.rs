//! Stdio JSON-lines server

use super::protocol::{dispatch, WireResponse};
use crate::error::Error;
use crate::query::QueryService;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

/// Answers one JSON request per stdin line with one JSON response per stdout line
pub struct LineServer {
    service: QueryService,
}

impl LineServer {
    pub fn new(service: QueryService) -> Self {
        Self { service }
    }

    /// Run the request loop until stdin closes
    pub async fn run(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();

        info!("Query server listening on stdio");
        self.serve_lines(stdin.lock(), stdout.lock()).await?;
        info!("Query server shutting down");
        Ok(())
    }

    /// Answer every non-blank line of `reader` on `writer`, in order
    pub async fn serve_lines<R: BufRead, W: Write>(
        &self,
        reader: R,
        mut writer: W,
    ) -> io::Result<()> {
        for line in reader.split(b'\n') {
            let bytes = line?;

            let response = match String::from_utf8(bytes) {
                Ok(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }
                    debug!("Received: {}", text);
                    dispatch(&self.service, text).await
                }
                Err(e) => {
                    warn!("Rejected request line: {}", e);
                    WireResponse::error(&Error::invalid("Request is not valid UTF-8"))
                }
            };

            let response_str = serde_json::to_string(&response)?;
            debug!("Sending: {}", response_str);
            writeln!(writer, "{}", response_str)?;
            writer.flush()?;
        }
        Ok(())
    }
}
