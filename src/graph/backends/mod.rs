//! Neptune backend implementations.
//!
//! Each backend implements [`CypherExecutor`](crate::graph::CypherExecutor)
//! and [`GraphBackend`](crate::graph::GraphBackend):
//!
//! | Backend | Module | openCypher | Gremlin | SPARQL / RDF |
//! |---------|--------|------------|---------|--------------|
//! | Neptune Database | [`database`] | yes | yes | yes (SigV4 HTTP) |
//! | Neptune Analytics | [`analytics`] | yes | no | no |

pub mod analytics;
pub mod database;
pub mod sparql;

pub use analytics::NeptuneAnalytics;
pub use database::NeptuneDatabase;
pub use sparql::SparqlClient;

use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::config::AwsConfig;

pub(crate) const SUMMARY_UNAVAILABLE: &str =
    "Summary API is not available for this instance of Neptune, ensure the engine version is >=1.2.1.0";
pub(crate) const SUMMARY_INVALID: &str = "Summary API did not return a valid response.";

/// Loads the shared AWS SDK configuration.
///
/// Uses the default provider chain, with the optional profile and region
/// overrides applied on top.
pub async fn load_sdk_config(aws: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(profile) = &aws.profile {
        loader = loader.profile_name(profile);
    }
    if let Some(region) = &aws.region {
        loader = loader.region(Region::new(region.clone()));
    }
    loader.load().await
}
