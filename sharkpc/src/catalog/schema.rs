//! Component data model shared by the catalog, the selection and the build registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Cpu,
    Gpu,
    Motherboard,
    Ram,
    Storage,
    Psu,
    Case,
}

impl ComponentType {
    /// Every type in picker order.
    pub const ALL: [ComponentType; 7] = [
        ComponentType::Cpu,
        ComponentType::Gpu,
        ComponentType::Motherboard,
        ComponentType::Ram,
        ComponentType::Storage,
        ComponentType::Psu,
        ComponentType::Case,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Cpu => "cpu",
            ComponentType::Gpu => "gpu",
            ComponentType::Motherboard => "motherboard",
            ComponentType::Ram => "ram",
            ComponentType::Storage => "storage",
            ComponentType::Psu => "psu",
            ComponentType::Case => "case",
        }
    }

    /// Human-readable label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentType::Cpu => "Processor",
            ComponentType::Gpu => "Graphics card",
            ComponentType::Motherboard => "Motherboard",
            ComponentType::Ram => "Memory",
            ComponentType::Storage => "Storage",
            ComponentType::Psu => "Power supply",
            ComponentType::Case => "Case",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component type '{0}'")]
pub struct UnknownComponentType(pub String);

impl FromStr for ComponentType {
    type Err = UnknownComponentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ComponentType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == lower)
            .ok_or(UnknownComponentType(s.to_string()))
    }
}

/// A single purchasable part.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Component {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Whole currency units.
    pub price: u64,
    /// CPU and motherboard only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
    /// Watts. Draw for cpu/gpu, rated output for psu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<u32>,
    /// Motherboard and case only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_factor: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compatibility: Vec<String>,
}

impl Component {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        component_type: ComponentType,
        price: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            component_type,
            price,
            socket: None,
            power: None,
            form_factor: None,
            compatibility: Vec::new(),
        }
    }

    pub fn with_socket(mut self, socket: impl Into<String>) -> Self {
        self.socket = Some(socket.into());
        self
    }

    pub fn with_power(mut self, watts: u32) -> Self {
        self.power = Some(watts);
        self
    }

    pub fn with_form_factor(mut self, form_factor: impl Into<String>) -> Self {
        self.form_factor = Some(form_factor.into());
        self
    }

    /// Attribute summary shown under the name in the component picker,
    /// e.g. `Socket: LGA1700 • 125W • `.
    pub fn spec_line(&self) -> String {
        let mut line = String::new();
        if let Some(ref socket) = self.socket {
            line.push_str(&format!("Socket: {} • ", socket));
        }
        if let Some(power) = self.power {
            line.push_str(&format!("{}W • ", power));
        }
        if let Some(ref form_factor) = self.form_factor {
            line.push_str(form_factor);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_parse() {
        assert_eq!("GPU".parse::<ComponentType>(), Ok(ComponentType::Gpu));
        assert_eq!(" case ".parse::<ComponentType>(), Ok(ComponentType::Case));
        let err = "monitor".parse::<ComponentType>().unwrap_err();
        assert_eq!(err, UnknownComponentType("monitor".to_string()));
        assert_eq!(err.to_string(), "unknown component type 'monitor'");
    }

    #[test]
    fn test_component_json_shape() {
        let json = r#"{"id":"mb1","name":"ASUS Z790-E","type":"motherboard","price":25000,"socket":"LGA1700","form_factor":"ATX"}"#;
        let component: Component = serde_json::from_str(json).unwrap();
        assert_eq!(component.component_type, ComponentType::Motherboard);
        assert_eq!(component.power, None);
        assert!(component.compatibility.is_empty());

        let back = serde_json::to_value(&component).unwrap();
        assert_eq!(back["type"], "motherboard");
        assert!(back.get("power").is_none());
    }

    #[test]
    fn test_spec_line() {
        let cpu = Component::new("cpu1", "Intel Core i7-13700K", ComponentType::Cpu, 45000)
            .with_socket("LGA1700")
            .with_power(125);
        assert_eq!(cpu.spec_line(), "Socket: LGA1700 • 125W • ");

        let case = Component::new("case1", "Meshify C", ComponentType::Case, 12000)
            .with_form_factor("ATX");
        assert_eq!(case.spec_line(), "ATX");

        let ram = Component::new("ram1", "32GB", ComponentType::Ram, 15000);
        assert_eq!(ram.spec_line(), "");
    }
}
