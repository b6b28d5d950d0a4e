//! Failure surfaces: encoding, transport, body read and cancellation.

mod common;

use common::{client_for, drain_request, raw_server, FailingReader, TRANSCRIPTIONS};
use mockito::Server;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use whisper_client::{
    CallContext, ContextError, ErrorKind, TranscriptionRequest, TransportError, FORMAT_TEXT,
};

fn request() -> TranscriptionRequest<&'static [u8]> {
    TranscriptionRequest::new("test_name", "en", FORMAT_TEXT, &b"test audio data"[..])
}

/// Fails the test instead of hanging if a call ignores its context.
async fn bounded<F: std::future::Future>(fut: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(10), fut)
        .await
        .expect("call did not return promptly")
}

#[tokio::test]
async fn reader_failure_is_an_encoding_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", TRANSCRIPTIONS)
        .with_body("should not be returned")
        .expect_at_most(1)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = bounded(client.transcribe_audio(
        &CallContext::background(),
        TranscriptionRequest::new("test_name", "en", FORMAT_TEXT, FailingReader::new()),
    ))
    .await
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Encoding);
    assert!(err.to_string().contains("microphone unplugged"), "{err}");
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}", addr));
    let err = bounded(client.transcribe_audio(&CallContext::background(), request()))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(matches!(&err, whisper_client::Error::Transport(e) if e.is_connect()), "{err:?}");
}

#[tokio::test]
async fn cancelled_context_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", TRANSCRIPTIONS)
        .expect(0)
        .create_async()
        .await;

    let ctx = CallContext::background();
    ctx.cancel();

    let client = client_for(&server.url());
    let err = client.transcribe_audio(&ctx, request()).await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(err.kind(), ErrorKind::Transport);
    mock.assert_async().await;
}

#[tokio::test]
async fn deadline_while_waiting_for_headers() {
    let url = raw_server(|mut socket| async move {
        drain_request(&mut socket).await;
        tokio::time::sleep(Duration::from_secs(30)).await;
    })
    .await;

    let client = client_for(&url);
    let ctx = CallContext::with_timeout(Duration::from_millis(200));
    let err = bounded(client.transcribe_audio(&ctx, request()))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.context_error(), Some(ContextError::DeadlineExceeded));
    assert!(err.is_timeout());
}

#[tokio::test]
async fn cancel_during_body_read() {
    let url = raw_server(|mut socket| async move {
        drain_request(&mut socket).await;
        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 64\r\n\r\npartial")
            .await;
        tokio::time::sleep(Duration::from_secs(30)).await;
    })
    .await;

    let client = client_for(&url);
    let ctx = CallContext::background();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        canceller.cancel();
    });

    let err = bounded(client.transcribe_audio(&ctx, request()))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ResponseRead);
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn connection_dropped_mid_body() {
    let url = raw_server(|mut socket| async move {
        drain_request(&mut socket).await;
        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 64\r\n\r\npartial")
            .await;
        let _ = socket.shutdown().await;
    })
    .await;

    let client = client_for(&url);
    let err = bounded(client.transcribe_audio(&CallContext::background(), request()))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ResponseRead);
    assert!(matches!(err, whisper_client::Error::ResponseRead(TransportError::Http(_))));
}
