//! SigV4-signed SPARQL over HTTP.
//!
//! Neptune Database exposes SPARQL at `/sparql` and only accepts
//! IAM-signed requests. Queries and updates are sent as
//! `application/x-www-form-urlencoded` bodies.

use std::time::SystemTime;

use aws_config::SdkConfig;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::http_request::{
    sign, SignableBody, SignableRequest, SigningParams, SigningSettings,
};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use reqwest::header::{HeaderName, HeaderValue, ACCEPT};
use serde_json::Value as JsonValue;

use crate::error::AppError;

/// SigV4 service name for Neptune Database.
const SERVICE_NAME: &str = "neptune-db";

const RESULTS_MEDIA_TYPE: &str = "application/sparql-results+json";

/// Keywords that make a SPARQL request a read.
const READ_FORMS: [&str; 4] = ["SELECT", "CONSTRUCT", "ASK", "DESCRIBE"];

/// Collapses all whitespace runs into single spaces.
pub fn normalize_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether a normalized request is a read (`query=`) or an update (`update=`).
///
/// `PREFIX` and `BASE` declarations are skipped before looking at the
/// operation keyword. Both end with an IRI reference, which can't contain `>`,
/// so `PREFIX ex:<http://ex.org/>` and `BASE<http://ex.org/>` need no spacing.
pub fn is_read_query(normalized: &str) -> bool {
    let mut rest = normalized.trim_start();
    while let Some(decl) = strip_keyword(rest, "PREFIX").or_else(|| strip_keyword(rest, "BASE")) {
        match decl.find('>') {
            Some(end) => rest = decl[end + 1..].trim_start(),
            None => return false,
        }
    }
    READ_FORMS
        .iter()
        .any(|form| strip_keyword(rest, form).is_some())
}

/// Case-insensitively strips a leading keyword.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let head = text.get(..keyword.len())?;
    head.eq_ignore_ascii_case(keyword)
        .then(|| &text[keyword.len()..])
}

/// Signed SPARQL client bound to one Neptune Database endpoint.
#[derive(Clone)]
pub struct SparqlClient {
    http: reqwest::Client,
    url: String,
    region: String,
    credentials: SharedCredentialsProvider,
}

impl std::fmt::Debug for SparqlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparqlClient")
            .field("url", &self.url)
            .field("region", &self.region)
            .finish()
    }
}

impl SparqlClient {
    /// Creates a client for `{endpoint_url}/sparql` using the SDK's region and
    /// credential provider.
    pub fn new(endpoint_url: &str, sdk_config: &SdkConfig) -> Result<Self, AppError> {
        let region = sdk_config
            .region()
            .map(|r| r.to_string())
            .ok_or(AppError::MissingRegion)?;
        let credentials = sdk_config.credentials_provider().ok_or_else(|| {
            AppError::Credentials(
                "no credentials provider configured; check the AWS profile".to_string(),
            )
        })?;

        Ok(Self::with_credentials(endpoint_url, region, credentials))
    }

    /// Creates a client from an explicit region and credential provider.
    pub fn with_credentials(
        endpoint_url: &str,
        region: impl Into<String>,
        credentials: SharedCredentialsProvider,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: format!("{}/sparql", endpoint_url.trim_end_matches('/')),
            region: region.into(),
            credentials,
        }
    }

    /// Executes a SPARQL query or update and returns the decoded JSON response.
    pub async fn execute(&self, query: &str) -> Result<JsonValue, AppError> {
        let (mut request, form_key) = self.build_request(query)?;
        self.sign(&mut request).await?;

        tracing::debug!(url = %self.url, form = form_key, "Sending signed SPARQL request");
        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::neptune("Error executing SPARQL query", body));
        }

        if body.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Builds the unsigned form POST. Returns the request and its form key.
    fn build_request(&self, query: &str) -> Result<(reqwest::Request, &'static str), AppError> {
        let normalized = normalize_query(query);
        let is_read = is_read_query(&normalized);
        let form_key = if is_read { "query" } else { "update" };

        let mut builder = self
            .http
            .post(&self.url)
            .form(&[(form_key, normalized.as_str())]);
        if is_read {
            builder = builder.header(ACCEPT, RESULTS_MEDIA_TYPE);
        }
        Ok((builder.build()?, form_key))
    }

    /// Adds SigV4 headers to a fully built request.
    async fn sign(&self, request: &mut reqwest::Request) -> Result<(), AppError> {
        let credentials = self
            .credentials
            .provide_credentials()
            .await
            .map_err(|e| AppError::Credentials(e.to_string()))?;
        let identity: Identity = credentials.into();

        let signing_params: SigningParams<'_> = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(SERVICE_NAME)
            .time(SystemTime::now())
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| AppError::Signing(e.to_string()))?
            .into();

        let body = request
            .body()
            .and_then(|b| b.as_bytes())
            .unwrap_or_default()
            .to_vec();
        let headers: Vec<(String, String)> = request
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();

        let signable = SignableRequest::new(
            request.method().as_str(),
            request.url().as_str(),
            headers.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            SignableBody::Bytes(&body),
        )
        .map_err(|e| AppError::Signing(e.to_string()))?;

        let (instructions, _signature) = sign(signable, &signing_params)
            .map_err(|e| AppError::Signing(e.to_string()))?
            .into_parts();

        for (name, value) in instructions.headers() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| AppError::Signing(e.to_string()))?;
            let value =
                HeaderValue::from_str(value).map_err(|e| AppError::Signing(e.to_string()))?;
            request.headers_mut().insert(name, value);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_credential_types::Credentials;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client(endpoint_url: &str) -> SparqlClient {
        let credentials = Credentials::new("AKIDEXAMPLE", "secret", None, None, "test");
        let mut client = SparqlClient::with_credentials(
            endpoint_url,
            "us-east-1",
            SharedCredentialsProvider::new(credentials),
        );
        client.http = reqwest::Client::builder().no_proxy().build().unwrap();
        client
    }

    fn body_text(request: &reqwest::Request) -> String {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap_or_default();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Serves one HTTP exchange with a canned response. Yields the raw request text.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&received).to_lowercase();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if received.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&received).into_owned()
        });

        (url, handle)
    }

    #[test]
    fn test_read_request_form() {
        let client = client("https://db.example.com:8182/");
        let (request, form_key) = client
            .build_request("SELECT ?s\nWHERE { ?s ?p ?o }")
            .unwrap();

        assert_eq!(form_key, "query");
        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().as_str(), "https://db.example.com:8182/sparql");
        assert_eq!(
            request.headers()[ACCEPT].to_str().unwrap(),
            RESULTS_MEDIA_TYPE
        );
        assert_eq!(
            request.headers()[reqwest::header::CONTENT_TYPE]
                .to_str()
                .unwrap(),
            "application/x-www-form-urlencoded"
        );
        assert!(body_text(&request).starts_with("query=SELECT+%3Fs+WHERE"));
    }

    #[test]
    fn test_update_request_form() {
        let client = client("https://db.example.com:8182");
        let (request, form_key) = client
            .build_request("INSERT DATA { <http://ex.org/a> <http://ex.org/b> 1 }")
            .unwrap();

        assert_eq!(form_key, "update");
        assert!(request.headers().get(ACCEPT).is_none());
        assert!(body_text(&request).starts_with("update=INSERT+DATA"));
    }

    #[tokio::test]
    async fn test_sign_adds_sigv4_headers() {
        let client = client("https://db.example.com:8182");
        let (mut request, _) = client.build_request("ASK { ?s ?p ?o }").unwrap();
        let body_before = body_text(&request);

        client.sign(&mut request).await.unwrap();

        let auth = request.headers()["authorization"].to_str().unwrap();
        assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
        assert!(auth.contains("/us-east-1/neptune-db/aws4_request"));
        assert!(auth.contains("Signature="));
        assert!(request.headers().contains_key("x-amz-date"));
        assert_eq!(body_text(&request), body_before);
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let (url, server) =
            serve_once("400 Bad Request", r#"{"code":"MalformedQueryException"}"#).await;

        let err = client(&url)
            .execute("DELETE WHERE { ?s ?p ?o }")
            .await
            .unwrap_err();

        match err {
            AppError::Neptune { message, details } => {
                assert_eq!(message, "Error executing SPARQL query");
                assert_eq!(details, r#"{"code":"MalformedQueryException"}"#);
            }
            other => panic!("expected Neptune error, got {:?}", other),
        }

        let received = server.await.unwrap().to_lowercase();
        assert!(received.starts_with("post /sparql "));
        assert!(received.contains("authorization: aws4-hmac-sha256"));
        assert!(received.contains("x-amz-date:"));
        assert!(received.ends_with("update=delete+where+%7b+%3fs+%3fp+%3fo+%7d"));
    }

    #[tokio::test]
    async fn test_success_decodes_json() {
        let (url, server) =
            serve_once("200 OK", r#"{"head":{"vars":["s"]},"results":{"bindings":[]}}"#).await;

        let result = client(&url)
            .execute("SELECT ?s WHERE { ?s ?p ?o }")
            .await
            .unwrap();

        assert_eq!(result["head"]["vars"][0], "s");
        let received = server.await.unwrap().to_lowercase();
        assert!(received.contains("accept: application/sparql-results+json"));
        assert!(received.contains("query=select"));
    }

    #[test]
    fn test_normalize_query() {
        let query = "\n  SELECT ?s\n\tWHERE {  ?s ?p ?o }\n  LIMIT 10 ";
        assert_eq!(
            normalize_query(query),
            "SELECT ?s WHERE { ?s ?p ?o } LIMIT 10"
        );
    }

    #[test]
    fn test_read_forms() {
        assert!(is_read_query("SELECT ?s WHERE { ?s ?p ?o }"));
        assert!(is_read_query("construct { ?s ?p ?o } WHERE { ?s ?p ?o }"));
        assert!(is_read_query("ASK { ?s ?p ?o }"));
        assert!(is_read_query("DESCRIBE <http://ex.org/a>"));
        assert!(is_read_query("SELECT*{?s ?p ?o}"));
    }

    #[test]
    fn test_prefix_and_base_skipped() {
        let query = normalize_query(
            "PREFIX owl: <http://www.w3.org/2002/07/owl#>\n\
             BASE <http://ex.org/>\n\
             CONSTRUCT { ?c a owl:Class } WHERE { ?c a owl:Class }",
        );
        assert!(is_read_query(&query));

        let unspaced = normalize_query(
            "PREFIX owl:<http://www.w3.org/2002/07/owl#>\n\
             SELECT ?c WHERE { ?c a owl:Class }",
        );
        assert!(is_read_query(&unspaced));
        assert!(is_read_query("BASE<http://ex.org/> ASK { ?s ?p ?o }"));
        assert!(is_read_query(
            "prefix a: <http://a.org/> prefix b:<http://b.org/>SELECT * { ?s a:p b:o }"
        ));
    }

    #[test]
    fn test_unterminated_prefix_is_not_a_read() {
        assert!(!is_read_query("PREFIX owl: SELECT ?c WHERE { ?c ?p ?o }"));
    }

    #[test]
    fn test_updates() {
        assert!(!is_read_query(
            "PREFIX ex: <http://ex.org/> INSERT DATA { ex:a ex:b ex:c }"
        ));
        assert!(!is_read_query("DELETE WHERE { ?s ?p ?o }"));
        assert!(!is_read_query("CLEAR ALL"));
        assert!(!is_read_query(""));
    }
}
