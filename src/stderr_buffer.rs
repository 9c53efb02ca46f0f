use std::io::{self, Write};
use std::sync::Mutex;

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

/// Activate buffering. While active, log records are stored
/// instead of printed to stderr.
pub fn activate() {
    if let Ok(mut guard) = BUFFER.lock() {
        *guard = Some(Vec::new());
    }
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    BUFFER
        .lock()
        .ok()
        .and_then(|mut guard| guard.take())
        .unwrap_or_default()
}

/// Write a message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn emit(msg: String) {
    let mut guard = match BUFFER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// `io::Write` sink for env_logger that routes each record through [`emit`].
struct BufferedStderr {
    pending: Vec<u8>,
}

impl Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]).into_owned();
            emit(text);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let text = String::from_utf8_lossy(&self.pending).into_owned();
            self.pending.clear();
            emit(text);
        }
        Ok(())
    }
}

/// Install the global logger. `-v` lowers the default filter to debug;
/// `RUST_LOG` overrides either.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .target(env_logger::Target::Pipe(Box::new(BufferedStderr { pending: Vec::new() })))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // Buffer state is global; keep everything touching it in one test.
    #[test]
    fn test_buffering_and_writer() {
        activate();
        emit("first".to_string());

        let mut writer = BufferedStderr { pending: Vec::new() };
        writer.write_all(b"[WARN] two\n[DEBUG] thr").unwrap();
        writer.write_all(b"ee\n").unwrap();
        writer.write_all(b"tail").unwrap();
        writer.flush().unwrap();

        assert_eq!(drain(), vec!["first", "[WARN] two", "[DEBUG] three", "tail"]);
        assert!(drain().is_empty());
    }
}
