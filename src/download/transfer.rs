//! Byte transfer of a resolved recording URL to disk.
//!
//! Both transports write into `<name>.part` and rename on success, so a file is
//! either complete on disk or absent.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, Response};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::{Config, TransferMethod};
use crate::error::{Error, Result};
use crate::output::create_download_bar;

/// Moves the bytes behind a URL into a local file.
#[async_trait]
pub trait FileTransfer: Send + Sync {
    /// Download `url` to `dest`, returning the number of bytes written.
    async fn transfer(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Build the transport selected in configuration.
pub fn transfer_for(config: &Config) -> Result<Box<dyn FileTransfer>> {
    let show_progress = config.options.download_progress;
    Ok(match config.options.transfer {
        TransferMethod::Http => Box::new(HttpTransfer::new(show_progress)?),
        TransferMethod::Curl => Box::new(CurlTransfer::new(show_progress)),
    })
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// Streams with the built-in HTTP client.
pub struct HttpTransfer {
    client: Client,
    show_progress: bool,
}

impl HttpTransfer {
    pub fn new(show_progress: bool) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            show_progress,
        })
    }

    /// Stream the body into `part`, returning the number of bytes written.
    async fn stream_to(&self, response: Response, part: &Path) -> Result<u64> {
        let expected = response.content_length();
        let progress = match (self.show_progress, expected) {
            (true, Some(len)) => Some(create_download_bar(len)),
            _ => None,
        };

        let mut file = File::create(part).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Transfer(format!("Stream error: {}", e)))?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(ref pb) = progress {
                pb.set_position(downloaded);
            }
        }

        file.flush().await?;
        file.sync_all().await?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        match expected {
            Some(len) if len != downloaded => Err(Error::Transfer(format!(
                "Body ended after {} of {} bytes",
                downloaded, len
            ))),
            _ => Ok(downloaded),
        }
    }
}

#[async_trait]
impl FileTransfer for HttpTransfer {
    async fn transfer(&self, url: &str, dest: &Path) -> Result<u64> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Transfer(format!(
                "Failed to download file: HTTP {}",
                response.status()
            )));
        }

        let part = part_path(dest);
        let written = self.stream_to(response, &part).await;
        finish_part(&part, dest, written).await
    }
}

/// Rename a completed `.part` into place, or remove it when the transfer failed.
async fn finish_part(part: &Path, dest: &Path, written: Result<u64>) -> Result<u64> {
    let result = match written {
        Ok(bytes) => tokio::fs::rename(part, dest)
            .await
            .map(|_| bytes)
            .map_err(Error::from),
        Err(e) => Err(e),
    };

    if result.is_err() {
        let _ = tokio::fs::remove_file(part).await;
    }
    result
}

/// Invokes the external `curl` binary.
pub struct CurlTransfer {
    show_progress: bool,
}

impl CurlTransfer {
    pub fn new(show_progress: bool) -> Self {
        Self { show_progress }
    }

    fn args(&self, url: &str, output: &Path) -> Vec<String> {
        vec![
            (if self.show_progress { "-#" } else { "-s" }).to_string(),
            "--fail".to_string(),
            url.to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ]
    }
}

#[async_trait]
impl FileTransfer for CurlTransfer {
    async fn transfer(&self, url: &str, dest: &Path) -> Result<u64> {
        let part = part_path(dest);
        let args = self.args(url, &part);
        tracing::debug!("Command line: curl {:?}", args);

        let written = match Command::new("curl")
            .args(&args)
            .stdin(Stdio::null())
            .status()
            .await
        {
            Ok(status) if status.success() => tokio::fs::metadata(&part)
                .await
                .map(|meta| meta.len())
                .map_err(Error::from),
            Ok(status) => Err(Error::Transfer(format!("curl exited with {}", status))),
            Err(e) => Err(Error::Transfer(format!("Failed to run curl: {}", e))),
        };

        finish_part(&part, dest, written).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `response` verbatim to every connection and return a URL on the listener.
    async fn serve(response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = socket.write_all(response).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}/rec/video.mp4", addr)
    }

    fn local_http() -> HttpTransfer {
        HttpTransfer {
            client: Client::builder().no_proxy().build().unwrap(),
            show_progress: false,
        }
    }

    #[tokio::test]
    async fn test_http_transfer_renames_complete_file() {
        let url = serve(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello").await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("video.mp4");

        let bytes = local_http().transfer(&url, &dest).await.unwrap();

        assert_eq!(bytes, 5);
        assert_eq!(std::fs::read(&dest).unwrap(), b"hello");
        assert!(!part_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_http_transfer_error_status_leaves_nothing() {
        let url = serve(
            b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\nboom",
        )
        .await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("video.mp4");

        assert!(matches!(
            local_http().transfer(&url, &dest).await,
            Err(Error::Transfer(_))
        ));
        assert!(!dest.exists());
        assert!(!part_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_http_transfer_truncated_body_leaves_nothing() {
        let url = serve(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nhello").await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("video.mp4");

        assert!(local_http().transfer(&url, &dest).await.is_err());
        assert!(!dest.exists());
        assert!(!part_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_finish_part_removes_part_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("chat.txt");
        let part = part_path(&dest);
        std::fs::write(&part, b"partial").unwrap();

        let result = finish_part(&part, &dest, Err(Error::Transfer("cut".into()))).await;

        assert!(result.is_err());
        assert!(!part.exists());
        assert!(!dest.exists());
    }

    fn has_curl() -> bool {
        std::process::Command::new("curl")
            .arg("--version")
            .output()
            .is_ok()
    }

    #[tokio::test]
    async fn test_curl_transfer_local_file() {
        if !has_curl() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.m4a");
        std::fs::write(&source, b"audio bytes").unwrap();
        let url = url::Url::from_file_path(&source).unwrap().to_string();
        let dest = dir.path().join("audio.m4a");

        let bytes = CurlTransfer::new(false).transfer(&url, &dest).await.unwrap();

        assert_eq!(bytes, 11);
        assert_eq!(std::fs::read(&dest).unwrap(), b"audio bytes");
        assert!(!part_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_curl_transfer_failure_leaves_nothing() {
        if !has_curl() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.m4a");
        let url = url::Url::from_file_path(&missing).unwrap().to_string();
        let dest = dir.path().join("audio.m4a");

        assert!(matches!(
            CurlTransfer::new(false).transfer(&url, &dest).await,
            Err(Error::Transfer(_))
        ));
        assert!(!dest.exists());
        assert!(!part_path(&dest).exists());
    }

    #[test]
    fn test_part_path() {
        assert_eq!(
            part_path(Path::new("/rec/a/video.mp4")),
            PathBuf::from("/rec/a/video.mp4.part")
        );
    }

    #[test]
    fn test_curl_args() {
        let quiet = CurlTransfer::new(false).args("https://x/y.mp4", Path::new("/d/y.mp4.part"));
        assert_eq!(quiet, ["-s", "--fail", "https://x/y.mp4", "-o", "/d/y.mp4.part"]);

        let loud = CurlTransfer::new(true).args("https://x/y.mp4", Path::new("/d/y.mp4.part"));
        assert_eq!(loud[0], "-#");
    }
}
