//! Terraform scaffold emission for resolved selections.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use yamlforge_catalog::LocationMap;
use yamlforge_select::SelectionResult;
use yamlforge_spec::Provider;

use crate::blocks::instance_block;
use crate::error::{IacError, IacResult};

/// One resolved instance ready for emission: the winning provider and
/// flavor, with the location already mapped to the provider-native region.
#[derive(Debug, Clone)]
pub struct EmitInstance {
    pub name: String,
    pub provider: Provider,
    pub native_type: String,
    pub region: Option<String>,
    pub adjusted_hourly_cost: f64,
}

impl EmitInstance {
    /// Build an emit record from a selection, resolving the universal
    /// location token to the winner's native region.
    pub fn from_selection(
        name: impl Into<String>,
        selection: &SelectionResult,
        location: Option<&str>,
        locations: &LocationMap,
    ) -> IacResult<Self> {
        let provider = selection.winner.provider();
        let region = match location {
            Some(token) => Some(
                locations
                    .resolve(token, provider)
                    .ok_or_else(|| IacError::RegionUnmapped {
                        location: token.to_string(),
                        provider: provider.to_string(),
                    })?
                    .to_string(),
            ),
            None => None,
        };

        Ok(Self {
            name: name.into(),
            provider,
            native_type: selection.winner.flavor.native_type_id.clone(),
            region,
            adjusted_hourly_cost: selection.winner.adjusted_hourly_cost,
        })
    }
}

/// Terraform emitter writing one configuration directory per run.
pub struct TerraformEmitter {
    target_dir: PathBuf,
}

impl TerraformEmitter {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self { target_dir: target_dir.into() }
    }

    /// Emit the full Terraform configuration for a set of resolved
    /// instances.
    pub fn generate(&self, instances: &[EmitInstance]) -> IacResult<()> {
        info!("Emitting Terraform to {:?}", self.target_dir);
        fs::create_dir_all(&self.target_dir)?;

        self.write_main_tf(instances)?;
        self.write_provider_tf(instances)?;
        self.write_versions_tf(instances)?;
        self.write_variables_tf()?;
        self.write_gitignore()?;

        info!("Terraform emission complete");
        Ok(())
    }

    fn providers(instances: &[EmitInstance]) -> BTreeSet<Provider> {
        instances.iter().map(|i| i.provider).collect()
    }

    fn write_main_tf(&self, instances: &[EmitInstance]) -> IacResult<()> {
        let mut content = format!(
            r#"# Generated by yamlforge on {}
#
# One resource block per resolved instance. Estimated hourly costs are
# informational; authoritative pricing lives with each provider.

locals {{
  common_tags = {{
    ManagedBy = "terraform"
    CreatedBy = "yamlforge"
  }}
}}
"#,
            Utc::now().format("%Y-%m-%d %H:%M UTC")
        );

        for instance in instances {
            content.push_str(&format!(
                "\n# {}: {} on {} (~${:.4}/hr)\n",
                instance.name,
                instance.native_type,
                instance.provider,
                instance.adjusted_hourly_cost
            ));
            content.push_str(&instance_block(instance));
            content.push('\n');
        }

        fs::write(self.target_dir.join("main.tf"), content)?;
        Ok(())
    }

    fn write_provider_tf(&self, instances: &[EmitInstance]) -> IacResult<()> {
        let mut content = String::new();
        for provider in Self::providers(instances) {
            let mut regions = instances
                .iter()
                .filter(|i| i.provider == provider)
                .filter_map(|i| i.region.as_deref());
            let region = regions.next();
            if let Some(first) = region {
                // One provider block per provider; conflicting regions on
                // the same provider cannot all be honored.
                if regions.any(|r| r != first) {
                    warn!(
                        "Instances on {} resolve to different regions; provider block uses {}",
                        provider, first
                    );
                }
            }
            content.push_str(&provider_config(provider, region));
            content.push('\n');
        }
        fs::write(self.target_dir.join("provider.tf"), content)?;
        Ok(())
    }

    fn write_versions_tf(&self, instances: &[EmitInstance]) -> IacResult<()> {
        let mut required = String::new();
        for provider in Self::providers(instances) {
            required.push_str(&format!(
                "    {} = {{\n      source = \"{}\"\n    }}\n",
                terraform_name(provider),
                provider.terraform_provider()
            ));
        }

        let content = format!(
            r#"terraform {{
  required_version = ">= 1.6.0"

  required_providers {{
{}  }}
}}
"#,
            required
        );
        fs::write(self.target_dir.join("versions.tf"), content)?;
        Ok(())
    }

    fn write_variables_tf(&self) -> IacResult<()> {
        let content = r#"variable "project_name" {
  description = "Project name applied to tags"
  type        = string
  default     = "yamlforge"
}
"#;
        fs::write(self.target_dir.join("variables.tf"), content)?;
        Ok(())
    }

    fn write_gitignore(&self) -> IacResult<()> {
        let content = "\
.terraform/
*.tfstate
*.tfstate.backup
*.tfvars
crash.log
";
        fs::write(self.target_dir.join(".gitignore"), content)?;
        Ok(())
    }
}

fn terraform_name(provider: Provider) -> &'static str {
    match provider {
        Provider::Aws => "aws",
        Provider::Azure => "azurerm",
        Provider::Gcp => "google",
        Provider::IbmVpc | Provider::IbmClassic => "ibm",
        Provider::Oci => "oci",
        Provider::Alibaba => "alicloud",
        Provider::Vmware => "vsphere",
        Provider::Cnv => "kubernetes",
    }
}

fn provider_config(provider: Provider, region: Option<&str>) -> String {
    match (provider, region) {
        (Provider::Aws, region) => format!(
            "provider \"aws\" {{\n  region = \"{}\"\n}}\n",
            region.unwrap_or("us-east-1")
        ),
        (Provider::Azure, _) => {
            "provider \"azurerm\" {\n  features {}\n}\n".to_string()
        }
        (Provider::Gcp, region) => format!(
            "provider \"google\" {{\n  region = \"{}\"\n}}\n",
            region.unwrap_or("us-east1")
        ),
        (Provider::IbmVpc | Provider::IbmClassic, region) => format!(
            "provider \"ibm\" {{\n  region = \"{}\"\n}}\n",
            region.unwrap_or("us-east")
        ),
        (Provider::Oci, region) => format!(
            "provider \"oci\" {{\n  region = \"{}\"\n}}\n",
            region.unwrap_or("us-ashburn-1")
        ),
        (Provider::Alibaba, region) => format!(
            "provider \"alicloud\" {{\n  region = \"{}\"\n}}\n",
            region.unwrap_or("us-east-1")
        ),
        (Provider::Vmware, _) => {
            "provider \"vsphere\" {\n  allow_unverified_ssl = true\n}\n".to_string()
        }
        (Provider::Cnv, _) => {
            "provider \"kubernetes\" {\n  config_path = \"~/.kube/config\"\n}\n".to_string()
        }
    }
}
