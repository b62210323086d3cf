use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Where the bytes of an upload end up once it has been staged.
///
/// Each upload flow (thumbnail, video) is configured with one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementBackend {
    /// Copy into the served assets directory and reference it by URL.
    Local,
    /// Embed the bytes into a `data:` URI stored on the record itself.
    Inline,
    /// Upload to the S3 bucket and reference it through the delivery host.
    S3,
}

impl FromStr for PlacementBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(PlacementBackend::Local),
            "inline" => Ok(PlacementBackend::Inline),
            "s3" => Ok(PlacementBackend::S3),
            _ => Err(anyhow::anyhow!("Invalid placement backend: {}", s)),
        }
    }
}

impl Display for PlacementBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PlacementBackend::Local => write!(f, "local"),
            PlacementBackend::Inline => write!(f, "inline"),
            PlacementBackend::S3 => write!(f, "s3"),
        }
    }
}
