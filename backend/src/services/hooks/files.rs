use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Responder};
use common::payload::FormFields;
use futures_util::StreamExt;
use log::info;

use super::{empty_page, merge_query_backup};

/// One uploaded file as seen by the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFile {
    pub field: String,
    pub name: String,
    pub size: u64,
}

/// Summary of one phase-2 request.
#[derive(Debug)]
pub struct FilesCapture {
    pub fields: FormFields,
    pub files: Vec<CapturedFile>,
}

impl FilesCapture {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// HTTP handler wrapper that converts the capture result to an `HttpResponse`.
///
/// - On success: logs every file and returns `200 OK` with an empty page.
/// - On failure: returns `400 Bad Request` with the error message.
pub async fn process(req: HttpRequest, payload: Multipart) -> impl Responder {
    match capture_files(req.query_string(), payload).await {
        Ok(capture) => {
            info!(
                "files {} [{}] {} files, {} bytes",
                capture.fields.get("lead_id").unwrap_or("-"),
                capture.fields.get("loan_type").unwrap_or("-"),
                capture.files.len(),
                capture.total_bytes()
            );
            for file in &capture.files {
                info!("  {}: {} ({} bytes)", file.field, file.name, file.size);
            }
            if let Some(manifest) = capture.fields.get("files_manifest") {
                info!("  manifest: {manifest}");
            }
            empty_page()
        }
        Err(e) => HttpResponse::BadRequest().body(format!("Error: {}", e)),
    }
}

/// Streams the multipart body. File parts are counted, never buffered;
/// text parts become fields.
pub async fn capture_files(
    query: &str,
    mut payload: Multipart,
) -> Result<FilesCapture, Box<dyn std::error::Error>> {
    let mut fields = FormFields::new();
    let mut files = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().map(|n| n.to_string()).unwrap_or_default(),
                cd.get_filename().map(|f| f.to_string()),
            ),
            None => (String::new(), None),
        };

        match filename {
            Some(filename) => {
                let mut size = 0u64;
                while let Some(chunk) = field.next().await {
                    size += chunk?.len() as u64;
                }
                files.push(CapturedFile {
                    field: name,
                    name: filename,
                    size,
                });
            }
            None => {
                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    bytes.extend_from_slice(&chunk?);
                }
                fields.set(name, String::from_utf8(bytes)?);
            }
        }
    }

    merge_query_backup(&mut fields, query);
    Ok(FilesCapture { fields, files })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::error::PayloadError;
    use actix_web::http::header::{self, HeaderMap, HeaderValue};
    use actix_web::web::Bytes;

    const BOUNDARY: &str = "XBOUNDARY";

    fn multipart(parts: &[(&str, Option<&str>, &str)]) -> Multipart {
        let mut body = String::new();
        for (name, filename, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(&format!("multipart/form-data; boundary={BOUNDARY}")).unwrap(),
        );
        let stream = futures_util::stream::once(async move {
            Ok::<Bytes, PayloadError>(Bytes::from(body))
        });
        Multipart::new(&headers, stream)
    }

    #[actix_web::test]
    async fn test_capture_counts_files_per_field() {
        let payload = multipart(&[
            ("lead_id", None, "lead_42"),
            ("loan_type", None, "DSCR"),
            ("doc_pfs", Some("pfs.pdf"), "0123456789"),
            ("doc_bank_statements[]", Some("jan.pdf"), "abc"),
            ("doc_bank_statements[]", Some("feb.pdf"), "abcdef"),
        ]);
        let capture = capture_files("", payload).await.unwrap();
        assert_eq!(capture.fields.get("lead_id"), Some("lead_42"));
        assert_eq!(capture.fields.get("loan_type"), Some("DSCR"));
        let names: Vec<(&str, &str, u64)> = capture
            .files
            .iter()
            .map(|f| (f.field.as_str(), f.name.as_str(), f.size))
            .collect();
        assert_eq!(
            names,
            vec![
                ("doc_pfs", "pfs.pdf", 10),
                ("doc_bank_statements[]", "jan.pdf", 3),
                ("doc_bank_statements[]", "feb.pdf", 6),
            ]
        );
        assert_eq!(capture.total_bytes(), 19);
    }

    #[actix_web::test]
    async fn test_capture_fills_fields_from_query() {
        let payload = multipart(&[("doc_t12", Some("t12.xlsx"), "x")]);
        let capture = capture_files("lead_id=lead_7&loan_type_label=Bridge", payload)
            .await
            .unwrap();
        assert_eq!(capture.fields.get("lead_id"), Some("lead_7"));
        assert_eq!(capture.fields.get("loan_type_label"), Some("Bridge"));
        assert_eq!(capture.files.len(), 1);
    }
}
