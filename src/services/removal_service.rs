//! Remote background removal.
//!
//! The service takes a multipart upload with a single image field and answers
//! with the processed image bytes.

use crate::config::AppConfig;
use crate::error::RemovalError;
use crate::file_utils::ImageFile;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use std::future::Future;

/// Anything that can turn an image into the same image without background.
pub trait BackgroundRemover {
    fn remove_background(
        &self,
        file: &ImageFile,
    ) -> impl Future<Output = Result<Vec<u8>, RemovalError>>;
}

/// HTTP client for the removal endpoint.
///
/// Requests run on tokio; poll them inside `async_compat::Compat` when driven
/// by the Slint event loop.
pub struct HttpBackgroundRemover {
    client: Client,
    endpoint: Url,
    field: String,
}

impl HttpBackgroundRemover {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            field: config.upload_field.clone(),
        }
    }

    fn form_for(&self, file: &ImageFile) -> Result<Form, RemovalError> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime())?;
        Ok(Form::new().part(self.field.clone(), part))
    }
}

impl BackgroundRemover for HttpBackgroundRemover {
    async fn remove_background(&self, file: &ImageFile) -> Result<Vec<u8>, RemovalError> {
        let form = self.form_for(file)?;
        debug!("POST {} ({} bytes)", self.endpoint, file.len());

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Background removal failed with status {}", status);
            return Err(RemovalError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(RemovalError::EmptyBody);
        }

        debug!("Received {} bytes from {}", body.len(), self.endpoint);
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_utils::test_support::encoded_image;
    use async_compat::Compat;
    use async_std::task::block_on;
    use image::ImageFormat;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answers a single request with `status` and `body`; joins to the raw request text.
    fn serve_once(status: &'static str, body: &'static [u8]) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/api/remove-bg", listener.local_addr().unwrap());

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request = String::new();
            let mut content_length = 0;
            let mut chunked = false;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                    if name.eq_ignore_ascii_case("transfer-encoding") {
                        chunked = value.trim().eq_ignore_ascii_case("chunked");
                    }
                }
                let end_of_head = line == "\r\n" || line.is_empty();
                request.push_str(&line);
                if end_of_head {
                    break;
                }
            }

            if chunked {
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap() == 0 || line == "0\r\n" {
                        break;
                    }
                    request.push_str(&line);
                }
            } else {
                let mut payload = vec![0u8; content_length];
                reader.read_exact(&mut payload).unwrap();
                request.push_str(&String::from_utf8_lossy(&payload));
            }

            let mut stream = reader.into_inner();
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .unwrap();
            stream.write_all(body).unwrap();
            stream.flush().unwrap();
            request
        });

        (endpoint, server)
    }

    fn remover(endpoint: &str, field: Option<&str>) -> HttpBackgroundRemover {
        let config = AppConfig::from_lookup(|key| match key {
            "ERASER_ENDPOINT" => Some(endpoint.to_string()),
            "ERASER_UPLOAD_FIELD" => field.map(str::to_string),
            _ => None,
        })
        .unwrap();
        HttpBackgroundRemover::new(&config)
    }

    fn photo() -> ImageFile {
        ImageFile::from_bytes("photo.png", encoded_image(ImageFormat::Png, 4, 4)).unwrap()
    }

    fn remove(remover: &HttpBackgroundRemover) -> Result<Vec<u8>, RemovalError> {
        let file = photo();
        block_on(Compat::new(remover.remove_background(&file)))
    }

    #[test]
    fn uploads_the_image_field_and_returns_the_body() {
        let (endpoint, server) = serve_once("200 OK", b"PNGDATA");

        let result = remove(&remover(&endpoint, None));
        let request = server.join().unwrap();

        assert_eq!(result.unwrap(), b"PNGDATA".to_vec());
        assert!(request.starts_with("POST /api/remove-bg HTTP/1.1\r\n"));
        assert!(request.contains("multipart/form-data; boundary="));
        assert!(request.contains(r#"name="image"; filename="photo.png""#));
        assert!(request.to_ascii_lowercase().contains("content-type: image/png"));
    }

    #[test]
    fn configured_field_name_is_used() {
        let (endpoint, server) = serve_once("200 OK", b"PNGDATA");

        remove(&remover(&endpoint, Some("file"))).unwrap();
        let request = server.join().unwrap();

        assert!(request.contains(r#"name="file"; filename="photo.png""#));
        assert!(!request.contains(r#"name="image""#));
    }

    #[test]
    fn server_error_maps_to_status() {
        let (endpoint, server) = serve_once("500 Internal Server Error", b"");

        let result = remove(&remover(&endpoint, None));
        server.join().unwrap();

        assert!(matches!(result, Err(RemovalError::Status(500))));
    }

    #[test]
    fn empty_success_body_is_rejected() {
        let (endpoint, server) = serve_once("200 OK", b"");

        let result = remove(&remover(&endpoint, None));
        server.join().unwrap();

        assert!(matches!(result, Err(RemovalError::EmptyBody)));
    }
}
