// tracing subscriber writing to the browser console

use crate::errors::UiError;
use std::io::{self, Write};
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wasm_bindgen::JsValue;

/// Buffers one formatted event and hands it to `console` when dropped
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buffer);
        let line = JsValue::from_str(line.trim_end());

        if self.level == Level::ERROR {
            web_sys::console::error_1(&line);
        } else if self.level == Level::WARN {
            web_sys::console::warn_1(&line);
        } else if self.level == Level::INFO {
            web_sys::console::info_1(&line);
        } else {
            web_sys::console::debug_1(&line);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Install the global subscriber. `filter` uses `EnvFilter` directive
/// syntax; an unparsable filter falls back to `info`.
pub fn init_logging(filter: &str) -> Result<(), UiError> {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(ConsoleMakeWriter)
                .with_ansi(false)
                .without_time(),
        )
        .try_init()
        .map_err(|e| UiError::Logging(e.to_string()))
}
