use anyhow::{Context, Result};
use mgate::negotiation::accept::{acceptable_content_types, essence};
use mgate::{ContentNegotiator, SerdeEngine};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Reads the payload from `input`, or stdin when absent.
///
/// # Errors
/// Returns an error if the file or stdin cannot be read.
pub fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body).context("Failed to read stdin")?;
            Ok(body)
        },
    }
}

/// Reads `body` declared as `content_type` and writes it in the format negotiated from `accept`.
///
/// # Result
/// `content-type: <media type>` followed by the body on the next line.
///
/// # Errors
/// Returns the gateway error when the input type is unsupported, the body is malformed,
/// or no response format is acceptable.
pub fn transcode(
    gateway: &ContentNegotiator<SerdeEngine>,
    content_type: &str,
    accept: &str,
    default: Option<&str>,
    body: &str,
) -> Result<String> {
    let value: Value = gateway.deserialize(Some(essence(content_type)), body)?;
    debug!(content_type, "Payload read");

    let response =
        gateway.serialize_response(&acceptable_content_types(accept), &[] as &[&str], &value, default)?;

    Ok(format!("content-type: {}\n{}", response.content_type, response.body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mgate::GatewayError;
    use mgate::domain::config::GatewayConfig;

    fn gateway() -> ContentNegotiator<SerdeEngine> {
        mgate::negotiator(&GatewayConfig::default()).unwrap()
    }

    #[test]
    fn json_to_xml() {
        let out = transcode(
            &gateway(),
            "application/json; charset=utf-8",
            "application/xml",
            None,
            r#"{"name":"Lamp","id":1}"#,
        )
        .unwrap();

        assert_eq!(out, "content-type: application/xml\n<result><id>1</id><name>Lamp</name></result>");
    }

    #[test]
    fn unsupported_input_type() {
        let err = transcode(&gateway(), "text/csv", "application/json", None, "a,b").unwrap_err();
        let gateway_err = err.downcast_ref::<GatewayError>().unwrap();
        assert_eq!(gateway_err.status_code(), Some(415));
    }

    #[test]
    fn read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        std::fs::write(&path, "{}").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "{}");

        let err = read_input(Some(&dir.path().join("missing.json"))).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
