use fnv::FnvHashSet;
use serde::Deserialize;

/// The parts of the exported patch description the bridge reads. The
/// document itself is handed to the engine factory untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatchExport {
    #[serde(default)]
    pub desc: PatchDesc,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatchDesc {
    #[serde(default)]
    pub meta: PatchMeta,
    #[serde(default)]
    pub parameters: Vec<ParamDesc>,
    #[serde(default)]
    pub inports: Vec<PortDesc>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatchMeta {
    #[serde(default)]
    pub rnboversion: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ParamDesc {
    #[serde(rename = "paramId", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PortDesc {
    pub tag: String,
}

impl PatchExport {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn runtime_version(&self) -> Option<&str> {
        self.desc.meta.rnboversion.as_deref()
    }

    /// Ids a message-driven engine accepts: declared parameters and inports.
    pub fn known_ids(&self) -> FnvHashSet<String> {
        self.desc
            .parameters
            .iter()
            .map(|p| p.id.clone())
            .chain(self.desc.inports.iter().map(|p| p.tag.clone()))
            .collect()
    }
}
