use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::encoding::{decode_properties, PropertiesEncoding};
use common::model::Property;
use common::payload::FormFields;
use log::info;
use url::form_urlencoded;

use super::{empty_page, merge_query_backup};

/// Summary of one phase-1 request.
#[derive(Debug)]
pub struct DetailsCapture {
    pub fields: FormFields,
    /// Keys recovered from the query string only.
    pub from_query: usize,
    pub properties: Vec<Property>,
}

/// HTTP handler wrapper that converts the capture result to an `HttpResponse`.
///
/// - On success: logs a summary and returns `200 OK` with an empty page.
/// - On failure: returns `400 Bad Request` with the error message.
pub async fn process(req: HttpRequest, body: web::Bytes) -> impl Responder {
    match capture_details(req.query_string(), &body) {
        Ok(capture) => {
            info!(
                "details {} [{}] {} fields ({} from query), {} properties",
                capture.fields.get("lead_id").unwrap_or("-"),
                capture.fields.get("loan_type").unwrap_or("-"),
                capture.fields.len(),
                capture.from_query,
                capture.properties.len()
            );
            for (index, property) in capture.properties.iter().enumerate() {
                let values: Vec<String> = property
                    .values()
                    .map(|(field, value)| format!("{}={value:?}", field.key()))
                    .collect();
                info!("  property #{}: {}", index + 1, values.join(", "));
            }
            empty_page()
        }
        Err(e) => HttpResponse::BadRequest().body(format!("Error: {}", e)),
    }
}

pub fn capture_details(
    query: &str,
    body: &[u8],
) -> Result<DetailsCapture, Box<dyn std::error::Error>> {
    let mut fields = FormFields::new();
    for (key, value) in form_urlencoded::parse(body) {
        fields.set(key.into_owned(), value.into_owned());
    }
    let from_query = merge_query_backup(&mut fields, query);

    let properties = match fields.get("properties_json") {
        Some(encoded) => decode_properties(detect_encoding(encoded), encoded)?,
        None => Vec::new(),
    };

    Ok(DetailsCapture {
        fields,
        from_query,
        properties,
    })
}

/// The base64 alphabet has no `[`, so a JSON array is easy to tell apart.
fn detect_encoding(value: &str) -> PropertiesEncoding {
    if value.trim_start().starts_with('[') {
        PropertiesEncoding::Json
    } else {
        PropertiesEncoding::LabeledText
    }
}
