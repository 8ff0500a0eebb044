//! Cloud provider definitions.

use serde::{Deserialize, Serialize};

/// Supported cloud and virtualization providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
    IbmVpc,
    IbmClassic,
    Oci,
    Alibaba,
    Vmware,
    Cnv,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Azure => "azure",
            Provider::Gcp => "gcp",
            Provider::IbmVpc => "ibm_vpc",
            Provider::IbmClassic => "ibm_classic",
            Provider::Oci => "oci",
            Provider::Alibaba => "alibaba",
            Provider::Vmware => "vmware",
            Provider::Cnv => "cnv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "aws" => Some(Provider::Aws),
            "azure" => Some(Provider::Azure),
            "gcp" => Some(Provider::Gcp),
            "ibm_vpc" => Some(Provider::IbmVpc),
            "ibm_classic" => Some(Provider::IbmClassic),
            "oci" => Some(Provider::Oci),
            "alibaba" => Some(Provider::Alibaba),
            "vmware" => Some(Provider::Vmware),
            "cnv" => Some(Provider::Cnv),
            _ => None,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Provider::Aws,
            Provider::Azure,
            Provider::Gcp,
            Provider::IbmVpc,
            Provider::IbmClassic,
            Provider::Oci,
            Provider::Alibaba,
            Provider::Vmware,
            Provider::Cnv,
        ]
    }

    /// Get the Terraform provider source name.
    pub fn terraform_provider(&self) -> &'static str {
        match self {
            Provider::Aws => "hashicorp/aws",
            Provider::Azure => "hashicorp/azurerm",
            Provider::Gcp => "hashicorp/google",
            Provider::IbmVpc | Provider::IbmClassic => "IBM-Cloud/ibm",
            Provider::Oci => "oracle/oci",
            Provider::Alibaba => "aliyun/alicloud",
            Provider::Vmware => "hashicorp/vsphere",
            Provider::Cnv => "hashicorp/kubernetes",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The provider field of an instance request.
///
/// `cheapest` and `cheapest-gpu` trigger the selection engine; a concrete
/// provider id bypasses it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RequestedProvider {
    Cheapest,
    CheapestGpu,
    Concrete(Provider),
}

impl RequestedProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestedProvider::Cheapest => "cheapest",
            RequestedProvider::CheapestGpu => "cheapest-gpu",
            RequestedProvider::Concrete(p) => p.as_str(),
        }
    }

    /// Whether this request goes through the cost-optimized selection path.
    pub fn is_meta(&self) -> bool {
        matches!(self, RequestedProvider::Cheapest | RequestedProvider::CheapestGpu)
    }
}

impl TryFrom<String> for RequestedProvider {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "cheapest" => Ok(RequestedProvider::Cheapest),
            "cheapest-gpu" | "cheapest_gpu" => Ok(RequestedProvider::CheapestGpu),
            other => Provider::from_str(other)
                .map(RequestedProvider::Concrete)
                .ok_or_else(|| format!("unknown provider: {}", s)),
        }
    }
}

impl From<RequestedProvider> for String {
    fn from(p: RequestedProvider) -> String {
        p.as_str().to_string()
    }
}

impl std::fmt::Display for RequestedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
