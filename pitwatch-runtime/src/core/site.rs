/// Site identity, carried in the configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde_derive::Deserialize)]
pub struct SiteProfile {
    /// Stable site identifier.
    pub id: String,
    /// Human readable site name.
    pub name: String,
    /// Operating region.
    #[serde(default)]
    pub region: Option<String>,
}

impl std::fmt::Display for SiteProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Site: {}; Name: {}", self.id, self.name)?;
        if let Some(region) = &self.region {
            write!(f, "; Region: {}", region)?;
        }

        Ok(())
    }
}
