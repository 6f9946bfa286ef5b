//! Minimal reader for legacy (Cordova) `plugin.xml` files
//!
//! Only the root `id` attribute and the `<platform name="...">` declarations
//! are extracted.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs;
use std::path::Path;

use crate::errors::ManifestError;
use crate::types::LegacyConfig;

pub const PLUGIN_XML: &str = "plugin.xml";

/// Parse `plugin.xml` content. Fails when the root element is not `<plugin>`.
pub fn parse_plugin_xml(content: &str, path: &Path) -> Result<LegacyConfig, ManifestError> {
    let xml_error = |message: String| ManifestError::Xml {
        path: path.to_path_buf(),
        message,
    };

    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut config = LegacyConfig::default();
    let mut seen_root = false;

    loop {
        match reader.read_event().map_err(|e| xml_error(e.to_string()))? {
            Event::Start(element) | Event::Empty(element) => {
                let name = element.local_name();
                if !seen_root {
                    if name.as_ref() != b"plugin" {
                        return Err(xml_error("root element is not <plugin>".to_string()));
                    }
                    seen_root = true;
                    if let Some(attr) = element
                        .try_get_attribute("id")
                        .map_err(|e| xml_error(e.to_string()))?
                    {
                        let id = attr
                            .unescape_value()
                            .map_err(|e| xml_error(e.to_string()))?;
                        config.id = Some(id.into_owned());
                    }
                } else if name.as_ref() == b"platform" {
                    if let Some(attr) = element
                        .try_get_attribute("name")
                        .map_err(|e| xml_error(e.to_string()))?
                    {
                        let platform = attr
                            .unescape_value()
                            .map_err(|e| xml_error(e.to_string()))?
                            .into_owned();
                        if !config.platforms.contains(&platform) {
                            config.platforms.push(platform);
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(xml_error("missing <plugin> element".to_string()));
    }
    Ok(config)
}

/// Read `plugin.xml` from a package root, if present
pub fn read_plugin_xml(package_root: &Path) -> Result<Option<LegacyConfig>, ManifestError> {
    let path = package_root.join(PLUGIN_XML);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path).map_err(|e| ManifestError::io(&path, e))?;
    parse_plugin_xml(&content, &path).map(Some)
}
