//! Per-provider Terraform resource templates.
//!
//! Mechanical mapping from a resolved (provider, flavor, region) triple to
//! an HCL resource block. No decision logic lives here.

use yamlforge_spec::Provider;

use crate::emitter::EmitInstance;

/// Render the instance resource block for one resolved selection.
pub fn instance_block(instance: &EmitInstance) -> String {
    let name = sanitize(&instance.name);
    match instance.provider {
        Provider::Aws => format!(
            r#"resource "aws_instance" "{name}" {{
  ami           = var.{name}_image_id
  instance_type = "{flavor}"

  tags = local.common_tags
}}"#,
            name = name,
            flavor = instance.native_type,
        ),
        Provider::Azure => format!(
            r#"resource "azurerm_linux_virtual_machine" "{name}" {{
  name                = "{raw_name}"
  location            = "{region}"
  resource_group_name = var.resource_group_name
  size                = "{flavor}"
  admin_username      = var.admin_username

  tags = local.common_tags
}}"#,
            name = name,
            raw_name = instance.name,
            region = instance.region.as_deref().unwrap_or("eastus"),
            flavor = instance.native_type,
        ),
        Provider::Gcp => format!(
            r#"resource "google_compute_instance" "{name}" {{
  name         = "{raw_name}"
  machine_type = "{flavor}"
  zone         = "{region}-a"

  labels = local.common_tags
}}"#,
            name = name,
            raw_name = instance.name,
            region = instance.region.as_deref().unwrap_or("us-east1"),
            flavor = instance.native_type,
        ),
        Provider::IbmVpc => format!(
            r#"resource "ibm_is_instance" "{name}" {{
  name    = "{raw_name}"
  profile = "{flavor}"
  zone    = "{region}-1"

  tags = [for k, v in local.common_tags : "${{k}}:${{v}}"]
}}"#,
            name = name,
            raw_name = instance.name,
            region = instance.region.as_deref().unwrap_or("us-east"),
            flavor = instance.native_type,
        ),
        Provider::IbmClassic => format!(
            r#"resource "ibm_compute_vm_instance" "{name}" {{
  hostname   = "{raw_name}"
  flavor_key_name = "{flavor}"
  datacenter = "{region}"
}}"#,
            name = name,
            raw_name = instance.name,
            region = instance.region.as_deref().unwrap_or("wdc07"),
            flavor = instance.native_type,
        ),
        Provider::Oci => format!(
            r#"resource "oci_core_instance" "{name}" {{
  display_name        = "{raw_name}"
  shape               = "{flavor}"
  availability_domain = var.{name}_availability_domain
  compartment_id      = var.compartment_ocid

  freeform_tags = local.common_tags
}}"#,
            name = name,
            raw_name = instance.name,
            flavor = instance.native_type,
        ),
        Provider::Alibaba => format!(
            r#"resource "alicloud_instance" "{name}" {{
  instance_name = "{raw_name}"
  instance_type = "{flavor}"

  tags = local.common_tags
}}"#,
            name = name,
            raw_name = instance.name,
            flavor = instance.native_type,
        ),
        Provider::Vmware => format!(
            r#"resource "vsphere_virtual_machine" "{name}" {{
  name             = "{raw_name}"
  resource_pool_id = var.resource_pool_id
  num_cpus         = var.{name}_num_cpus
  memory           = var.{name}_memory_mb
}}"#,
            name = name,
            raw_name = instance.name,
        ),
        Provider::Cnv => format!(
            r#"resource "kubernetes_manifest" "{name}" {{
  manifest = {{
    apiVersion = "kubevirt.io/v1"
    kind       = "VirtualMachine"
    metadata = {{
      name      = "{raw_name}"
      namespace = var.namespace
    }}
  }}
}}"#,
            name = name,
            raw_name = instance.name,
        ),
    }
}

/// Terraform resource labels cannot contain hyphens at the start or dots.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
