//! End-to-end tests of the text frontend over the production runtime.
//!
//! Commands come from an in-memory pipe, the backend is the in-memory fake,
//! and the tokio clock is paused so polling and toasts run on virtual time.

use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
    time::Duration,
};

use finstagram_app::{App, AppConfig, Runtime, SystemEnv, View};
use finstagram_cli::LineDriver;
use finstagram_client::ApiError;
use finstagram_harness::{Call, FakeBackend, Route};
use finstagram_proto::OutgoingMessage;
use finstagram_store::MemoryStore;
use tokio::io::AsyncWriteExt;

/// Writer whose contents stay readable after the runtime consumed it.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Type `lines` one at a time, pausing between them.
fn typist(lines: &'static [(&'static str, u64)]) -> tokio::io::DuplexStream {
    let (mut writer, reader) = tokio::io::duplex(1024);
    tokio::spawn(async move {
        for (line, pause_ms) in lines {
            writer.write_all(line.as_bytes()).await.unwrap();
            writer.write_all(b"\n").await.unwrap();
            tokio::time::sleep(Duration::from_millis(*pause_ms)).await;
        }
    });
    reader
}

#[tokio::test(start_paused = true)]
async fn help_errors_and_validation_are_printed() {
    let out = SharedBuf::default();
    let input: &[u8] = b"help\ndance\nlogin abc\nquit\n";
    let driver = LineDriver::new(input, out.clone());
    let app = App::new(SystemEnv::new(), MemoryStore::new(), AppConfig::default());
    let backend = FakeBackend::new();

    let app = Runtime::new(driver, app, backend.clone()).run().await.unwrap();

    let text = out.contents();
    assert!(text.contains("commands:"));
    assert!(text.contains("error: unknown command `dance`"));
    assert!(text.contains("[error] Please fill all fields"));
    assert_eq!(app.current_view(), View::Login);
    assert!(backend.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn chat_session_over_text_commands() {
    let backend =
        FakeBackend::new().with_account("abc", "x", true).with_message("bob", "abc", "hi");
    let out = SharedBuf::default();
    let input = typist(&[
        ("login abc x", 500),
        ("go messages", 500),
        ("open bob", 500),
        ("say yo", 4000),
        ("quit", 0),
    ]);
    let driver = LineDriver::new(input, out.clone());
    let store = MemoryStore::new();
    let app = App::new(SystemEnv::new(), store.clone(), AppConfig::default());

    let app = Runtime::new(driver, app, backend.clone()).run().await.unwrap();

    let text = out.contents();
    assert!(text.contains("== feed == @abc"));
    assert!(text.contains("Chat with @bob"));
    assert!(text.contains("bob: hi"));
    assert!(backend.calls().contains(&Call::SendMessage(OutgoingMessage {
        sender: "abc".to_string(),
        receiver: "bob".to_string(),
        text: "yo".to_string(),
    })));

    // The poll after the send shows the stored message as confirmed
    let thread = app.thread().unwrap();
    let texts: Vec<_> = thread.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["hi", "yo"]);
    assert!(thread.messages().iter().all(|m| !m.is_optimistic()));
    assert_eq!(app.draft(), "");
}

#[tokio::test(start_paused = true)]
async fn offline_login_reports_server_offline() {
    let backend = FakeBackend::new();
    backend.fail_next(Route::Login, ApiError::Transport("connection refused".to_string()));
    let out = SharedBuf::default();
    let input = typist(&[("login abc x", 200), ("quit", 0)]);
    let driver = LineDriver::new(input, out.clone());
    let app = App::new(SystemEnv::new(), MemoryStore::new(), AppConfig::default());

    Runtime::new(driver, app, backend).run().await.unwrap();

    assert!(out.contents().contains("[error] Server offline"));
}
