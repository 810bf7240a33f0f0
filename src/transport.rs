use std::io::Read;

use crate::codec;
use crate::config::AppConfig;
use crate::error::TransportError;

/// Name of the file part the service reads the table from
pub const FILE_FIELD: &str = "file";
pub const FILE_NAME: &str = "drawing.csv";
pub const FILE_MIME: &str = "text/csv";

/// Something that takes a stroke table and answers with another one.
pub trait StrokeService: Send + Sync {
    fn exchange(&self, csv: &str) -> Result<String, TransportError>;
}

/// Uploads the table as `multipart/form-data` with one blocking POST.
///
/// No retry and no timeout: a hung service hangs the call.
pub struct HttpStrokeService {
    agent: ureq::Agent,
    url: String,
    max_response_bytes: u64,
}

impl HttpStrokeService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            url: config.upload_url(),
            max_response_bytes: config.max_response_bytes,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl StrokeService for HttpStrokeService {
    fn exchange(&self, csv: &str) -> Result<String, TransportError> {
        let form = MultipartForm::with_csv_file(csv);
        log::info!("Uploading {} bytes to {}", form.body.len(), self.url);

        let response = self
            .agent
            .post(&self.url)
            .set("Content-Type", &form.content_type())
            .send_bytes(&form.body)?;

        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(TransportError::Status(status));
        }

        // Read one byte past the limit to tell "exactly at" from "over"
        let mut buf = Vec::new();
        response
            .into_reader()
            .take(self.max_response_bytes + 1)
            .read_to_end(&mut buf)?;
        if buf.len() as u64 > self.max_response_bytes {
            return Err(TransportError::TooLarge(self.max_response_bytes));
        }

        let body = String::from_utf8(buf)
            .map_err(|_| TransportError::UnexpectedBody("not UTF-8".to_owned()))?;
        check_table(&body)?;
        log::info!("Service answered with {} bytes", body.len());
        Ok(body)
    }
}

fn check_table(body: &str) -> Result<(), TransportError> {
    let first_line = body.lines().next().unwrap_or_default();
    if codec::is_header(first_line) {
        Ok(())
    } else {
        let preview: String = first_line.chars().take(80).collect();
        Err(TransportError::UnexpectedBody(format!(
            "first line is {:?}",
            preview
        )))
    }
}

/// A `multipart/form-data` body holding a single CSV file part
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn with_csv_file(csv: &str) -> Self {
        let boundary = format!("autosketch-{}", uuid::Uuid::new_v4().simple());

        let mut body = Vec::with_capacity(csv.len() + 256);
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                FILE_FIELD, FILE_NAME
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", FILE_MIME).as_bytes());
        body.extend_from_slice(csv.as_bytes());
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        Self { boundary, body }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
