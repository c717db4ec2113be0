//! Test harness for backend integration tests.
//!
//! Serves the real router on an ephemeral localhost port so requests go through
//! the same HTTP stack the widget uses.

use std::net::SocketAddr;

use docsearch_server::catalog::{Catalog, Document};
use docsearch_server::router;
use docsearch_server::types::AppContext;
use tokio::task::JoinHandle;

pub struct TestServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve the built-in catalog.
    pub async fn builtin(limit: usize) -> Self {
        Self::with_catalog(Catalog::builtin(), limit).await
    }

    /// Serve a catalog built from `(title, topic, author, location)` tuples.
    pub async fn from_docs(docs: &[(&str, &str, &str, &str)], limit: usize) -> Self {
        let documents = docs
            .iter()
            .map(|(title, topic, author, location)| Document {
                title: title.to_string(),
                topic: topic.to_string(),
                author: author.to_string(),
                location: location.to_string(),
            })
            .collect();
        Self::with_catalog(Catalog::new(documents), limit).await
    }

    pub async fn with_catalog(catalog: Catalog, limit: usize) -> Self {
        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind test port");
        let addr = listener.local_addr().expect("No local addr");
        let app = router(AppContext::new(catalog, limit));
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });
        TestServer { addr, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn search_endpoint(&self) -> String {
        self.url("/search/")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
