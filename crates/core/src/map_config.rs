//! Public map configuration served to browser clients.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Prefix carried by Mapbox public (browser-safe) tokens.
pub const PUBLIC_TOKEN_PREFIX: &str = "pk.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub mapbox_token: String,
}

/// Builds the map configuration from the configured token.
///
/// A missing token is a server misconfiguration (`MissingConfigKey`); a
/// secret or malformed token is rejected (`InvalidConfigValue`) so it never
/// reaches a browser.
pub fn resolve_map_config(token: Option<&str>) -> Result<MapConfig> {
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::MissingConfigKey("MAPBOX_PUBLIC_TOKEN".to_string()))?;

    if !token.starts_with(PUBLIC_TOKEN_PREFIX) {
        return Err(Error::InvalidConfigValue(format!(
            "Mapbox token must be a public token starting with '{}'",
            PUBLIC_TOKEN_PREFIX
        )));
    }

    Ok(MapConfig {
        mapbox_token: token.to_string(),
    })
}
