use url::Url;

use crate::TelemetryError;

const REDACT_AFTER: usize = 20;

/// Parsed endpoint/credential string of the hosted error tracker,
/// in the form `<scheme>://<public_key>@<host>[:port]/<project_id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    raw: String,
    scheme: String,
    public_key: String,
    host: String,
    port: Option<u16>,
    project_id: String,
}

impl Dsn {
    pub fn parse(raw: &str) -> Result<Self, TelemetryError> {
        let invalid = |reason| TelemetryError::Dsn {
            dsn: redact(raw),
            reason,
        };
        let url = Url::parse(raw).map_err(|_| invalid("not a URL"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.username().is_empty() {
            return Err(invalid("missing public key"));
        }
        let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
        let project_id = url
            .path_segments()
            .and_then(|mut segs| segs.next_back())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| invalid("missing project id"))?;

        Ok(Self {
            raw: raw.to_string(),
            scheme: url.scheme().to_string(),
            public_key: url.username().to_string(),
            host: host.to_string(),
            port: url.port(),
            project_id: project_id.to_string(),
        })
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Endpoint events are POSTed to.
    pub fn store_endpoint(&self) -> Result<Url, TelemetryError> {
        let authority = match self.port {
            Some(p) => format!("{}:{p}", self.host),
            None => self.host.clone(),
        };
        let endpoint = format!(
            "{}://{authority}/api/{}/store/",
            self.scheme, self.project_id
        );
        Url::parse(&endpoint).map_err(|_| TelemetryError::Dsn {
            dsn: self.redacted(),
            reason: "cannot build store endpoint",
        })
    }

    /// Value of the authentication header sent with every event.
    pub fn auth_header(&self, client: &str) -> String {
        format!(
            "Sentry sentry_version=7, sentry_key={}, sentry_client={client}",
            self.public_key
        )
    }

    pub fn redacted(&self) -> String {
        redact(&self.raw)
    }
}

impl std::fmt::Display for Dsn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.redacted())
    }
}

fn redact(raw: &str) -> String {
    let head: String = raw.chars().take(REDACT_AFTER).collect();
    format!("{head}...")
}
