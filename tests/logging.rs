//! What the service logs for a failed request.
//!
//! Each test installs a thread-local `fmt` subscriber writing into a buffer.
//! `#[tokio::test]` runs on a current-thread runtime, so handler tasks the
//! router spawns are polled on the test thread and log into the same buffer.

use std::io;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use tracing_subscriber::fmt::MakeWriter;
use wiki_api::store::{StoreError, UpdateResult};
use wiki_api::{Article, ArticleFields, ArticleStore, Method, Request, Response, Router, Status, app};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn lines(&self) -> Vec<String> {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).lines().map(str::to_owned).collect()
    }

    /// Lines at `WARN` or `ERROR`.
    fn problems(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(" WARN ") || line.contains("ERROR "))
            .collect()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture() -> (Captured, tracing::subscriber::DefaultGuard) {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (captured, guard)
}

fn get(uri: &str) -> http::Request<Bytes> {
    http::Request::builder().method("GET").uri(uri).body(Bytes::new()).unwrap()
}

struct DownStore;

fn down() -> StoreError {
    StoreError::Unavailable("connection refused".into())
}

impl ArticleStore for DownStore {
    async fn find_all(&self) -> Result<Vec<Article>, StoreError> { Err(down()) }
    async fn find_one(&self, _: &str) -> Result<Option<Article>, StoreError> { Err(down()) }
    async fn insert_one(&self, _: Article) -> Result<(), StoreError> { Err(down()) }
    async fn replace_one(&self, _: &str, _: Article) -> Result<UpdateResult, StoreError> { Err(down()) }
    async fn update_one(&self, _: &str, _: ArticleFields) -> Result<Option<Article>, StoreError> { Err(down()) }
    async fn delete_all(&self) -> Result<u64, StoreError> { Err(down()) }
    async fn delete_one(&self, _: &str) -> Result<u64, StoreError> { Err(down()) }
    async fn ping(&self) -> Result<(), StoreError> { Err(down()) }
}

#[tokio::test]
async fn store_failure_is_logged_once() {
    let (captured, _guard) = capture();
    let app = app(Arc::new(DownStore));

    let res = app.handle(get("/articles")).await;
    assert_eq!(res.status_code(), Status::InternalServerError);

    let problems = captured.problems();
    assert_eq!(problems.len(), 1, "{problems:#?}");
    assert!(problems[0].contains("connection refused"), "{}", problems[0]);

    let completed: Vec<_> = captured.lines().into_iter().filter(|l| l.contains("request completed")).collect();
    assert_eq!(completed.len(), 1);
    assert!(completed[0].contains("status=500"), "{}", completed[0]);
}

#[tokio::test]
async fn each_failed_request_logs_its_own_line() {
    let (captured, _guard) = capture();
    let app = app(Arc::new(DownStore));

    for uri in ["/articles", "/articles/Leaf", "/articles"] {
        app.handle(get(uri)).await;
    }
    assert_eq!(captured.problems().len(), 3);
}

#[tokio::test]
async fn handler_panic_is_logged_once() {
    async fn boom(_req: Request) -> Response {
        panic!("handler bug");
    }

    let (captured, _guard) = capture();
    let router = Router::new().on(Method::Get, "/boom", boom);

    let res = router.handle(get("/boom")).await;
    assert_eq!(res.status_code(), Status::InternalServerError);

    let problems = captured.problems();
    assert_eq!(problems.len(), 1, "{problems:#?}");
    assert!(problems[0].contains("handler failed"), "{}", problems[0]);
}

#[tokio::test]
async fn successful_requests_log_no_problems() {
    let (captured, _guard) = capture();
    let app = app(Arc::new(wiki_api::store::MemoryStore::new()));

    assert_eq!(app.handle(get("/healthz")).await.status_code(), Status::Ok);
    assert_eq!(app.handle(get("/readyz")).await.status_code(), Status::Ok);
    assert!(captured.problems().is_empty(), "{:#?}", captured.problems());
}
