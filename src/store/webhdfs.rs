// src/store/webhdfs.rs

use reqwest::{Client, Method, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::config::HdfsConfig;
use crate::error::{Result, ScrapeError};
use crate::store::blob::BlobStore;

/// HDFS over the WebHDFS REST API, authenticating with `user.name`.
#[derive(Clone)]
pub struct WebHdfsStore {
    client: Client,
    base: Url,
    user: String,
}

#[derive(Deserialize)]
struct RemoteExceptionBody {
    #[serde(rename = "RemoteException")]
    remote_exception: RemoteException,
}

#[derive(Deserialize)]
struct RemoteException {
    exception: String,
    message: String,
}

#[derive(Deserialize)]
struct ListStatusBody {
    #[serde(rename = "FileStatuses")]
    file_statuses: FileStatuses,
}

#[derive(Deserialize)]
struct FileStatuses {
    #[serde(rename = "FileStatus")]
    file_status: Vec<FileStatus>,
}

#[derive(Deserialize)]
struct FileStatus {
    #[serde(rename = "pathSuffix")]
    path_suffix: String,
    #[serde(rename = "type")]
    kind: String,
}

impl WebHdfsStore {
    /// `timeout` bounds each request, body included.
    pub fn new(cfg: &HdfsConfig, timeout: Duration) -> Result<Self> {
        let base = Url::parse(&cfg.url)
            .map_err(|e| ScrapeError::storage(cfg.url.clone(), format!("bad namenode URL: {}", e)))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScrapeError::network(cfg.url.clone(), e))?;
        Ok(Self {
            client,
            base,
            user: cfg.user.clone(),
        })
    }

    fn op_url(&self, path: &str, op: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("/webhdfs/v1/{}", path.trim_matches('/')));
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("op", op);
            q.append_pair("user.name", &self.user);
            for (k, v) in extra {
                q.append_pair(k, v);
            }
        }
        url
    }

    /// Send and turn non-2xx replies into `Storage` errors carrying the remote message.
    async fn call(&self, method: Method, url: Url, path: &str, body: Option<Vec<u8>>) -> Result<Response> {
        debug!(%method, %url, "webhdfs request");
        let mut req = self.client.request(method, url.clone());
        if let Some(body) = body {
            req = req.body(body);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| ScrapeError::network(url.as_str(), e))?;
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<RemoteExceptionBody>(&text) {
            Ok(b) => format!(
                "{} {}: {}",
                status, b.remote_exception.exception, b.remote_exception.message
            ),
            Err(_) => format!("{} {}", status, text.trim()),
        };
        Err(ScrapeError::storage(path, message))
    }
}

impl BlobStore for WebHdfsStore {
    #[instrument(level = "debug", skip(self))]
    async fn make_dirs(&self, dir: &str) -> Result<()> {
        let url = self.op_url(dir, "MKDIRS", &[]);
        self.call(Method::PUT, url, dir, None).await?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self, data), fields(bytes = data.len()))]
    async fn upload(&self, path: &str, data: Vec<u8>) -> Result<()> {
        // The namenode answers with a redirect to a datanode; reqwest replays the body.
        let url = self.op_url(path, "CREATE", &[("overwrite", "false")]);
        self.call(Method::PUT, url, path, Some(data)).await?;
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.op_url(path, "OPEN", &[]);
        let resp = self.call(Method::GET, url.clone(), path, None).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ScrapeError::network(url.as_str(), e))?;
        Ok(bytes.to_vec())
    }

    async fn list(&self, dir: &str) -> Result<Vec<String>> {
        let url = self.op_url(dir, "LISTSTATUS", &[]);
        let resp = self.call(Method::GET, url.clone(), dir, None).await?;
        let body: ListStatusBody = resp
            .json()
            .await
            .map_err(|e| ScrapeError::network(url.as_str(), e))?;
        let mut names: Vec<String> = body
            .file_statuses
            .file_status
            .into_iter()
            .filter(|s| s.kind == "FILE")
            .map(|s| s.path_suffix)
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn store_with_timeout(url: String, timeout: Duration) -> WebHdfsStore {
        WebHdfsStore::new(
            &HdfsConfig {
                url,
                user: "hadoop".into(),
                target_dir: "/data/".into(),
            },
            timeout,
        )
        .unwrap()
    }

    fn store(url: String) -> WebHdfsStore {
        store_with_timeout(url, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn create_follows_datanode_redirect() -> anyhow::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let redirect = format!("{}/datanode/Sports.csv", server.url());
        let nn = server
            .mock("PUT", "/webhdfs/v1/data/Sports.csv")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("op".into(), "CREATE".into()),
                Matcher::UrlEncoded("overwrite".into(), "false".into()),
                Matcher::UrlEncoded("user.name".into(), "hadoop".into()),
            ]))
            .with_status(307)
            .with_header("location", &redirect)
            .create_async()
            .await;
        let dn = server
            .mock("PUT", "/datanode/Sports.csv")
            .match_body("Sport\nArchery\n")
            .with_status(201)
            .create_async()
            .await;

        store(server.url())
            .upload("/data/Sports.csv", b"Sport\nArchery\n".to_vec())
            .await?;
        nn.assert_async().await;
        dn.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn remote_exception_becomes_storage_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("PUT", "/webhdfs/v1/data/Sports.csv")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(
                r#"{"RemoteException":{"exception":"FileAlreadyExistsException","javaClassName":"x","message":"/data/Sports.csv exists"}}"#,
            )
            .create_async()
            .await;

        let err = store(server.url())
            .upload("/data/Sports.csv", b"x".to_vec())
            .await
            .unwrap_err();
        match err {
            ScrapeError::Storage { message, .. } => {
                assert!(message.contains("FileAlreadyExistsException"), "{}", message)
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn lists_files_only() -> anyhow::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/webhdfs/v1/data")
            .match_query(Matcher::UrlEncoded("op".into(), "LISTSTATUS".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"FileStatuses":{"FileStatus":[
                    {"pathSuffix":"Sports.csv","type":"FILE","length":10},
                    {"pathSuffix":"archive","type":"DIRECTORY","length":0},
                    {"pathSuffix":"Olympiad.csv","type":"FILE","length":12}
                ]}}"#,
            )
            .create_async()
            .await;

        let names = store(server.url()).list("/data/").await?;
        assert_eq!(names, vec!["Olympiad.csv", "Sports.csv"]);
        Ok(())
    }

    #[tokio::test]
    async fn hung_namenode_times_out() {
        use std::io::Write;

        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/webhdfs/v1/data")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(std::time::Duration::from_secs(2));
                w.write_all(br#"{"FileStatuses":{"FileStatus":[]}}"#)
            })
            .create_async()
            .await;

        let started = std::time::Instant::now();
        let err = store_with_timeout(server.url(), Duration::from_millis(200))
            .list("/data")
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Network { .. }), "{:?}", err);
        assert!(started.elapsed() < Duration::from_millis(1500));
    }
}
