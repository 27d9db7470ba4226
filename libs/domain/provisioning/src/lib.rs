// [libs/domain/provisioning/src/lib.rs]
/*!
 * =================================================================
 * APARATO: MANIFEST GENERATOR (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: TRADUCCIÓN DE SERVICIO + PLAN + INSTANCIA -> MANIFIESTOS
 *
 * Pure and synchronous: given a service, a plan and an instance, produces
 * the ordered list of JSON documents `gridkeep-infra-orchestrator-client`
 * sends to the external resource API. No I/O, so it is unit-testable
 * without a network or a database (`spec.md` §4.5).
 * =================================================================
 */

use chrono::{DateTime, Utc};
use gridkeep_domain_models::{Service, ServiceInstance, ServicePlan};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use typeshare::typeshare;

const WORKLOAD_PORT: u16 = 8080;

#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceManifest {
    pub name: String,
    pub labels: Value,
}

#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMapManifest {
    pub name: String,
    pub namespace: String,
    pub data: Value,
}

#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageClaimManifest {
    pub name: String,
    pub namespace: String,
    pub access_mode: String,
    pub size: String,
}

#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadManifest {
    pub name: String,
    pub namespace: String,
    pub plan_type: String,
    pub image: String,
    pub cpu_limit: String,
    pub memory_limit: String,
    pub replicas: u32,
    pub port: u16,
    pub env: Value,
    pub storage_claim: Option<String>,
    pub labels: Value,
}

#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalServiceManifest {
    pub name: String,
    pub namespace: String,
    pub selector: Value,
    pub port: u16,
    pub target_port: u16,
}

#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngressManifest {
    pub name: String,
    pub namespace: String,
    pub host: String,
    pub backend_service: String,
    pub tls_secret_name: Option<String>,
}

/// One entry in the ordered list `generate` returns. Tagged by `kind` so
/// the orchestrator client's `apply`/`delete` capability can dispatch on
/// it without the caller unpacking the enum first (`spec.md` §4.4).
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Manifest {
    Namespace(NamespaceManifest),
    ConfigMap(ConfigMapManifest),
    StorageClaim(StorageClaimManifest),
    Workload(WorkloadManifest),
    InternalService(InternalServiceManifest),
    Ingress(IngressManifest),
}

impl Manifest {
    pub fn kind(&self) -> &'static str {
        match self {
            Manifest::Namespace(_) => "Namespace",
            Manifest::ConfigMap(_) => "ConfigMap",
            Manifest::StorageClaim(_) => "StorageClaim",
            Manifest::Workload(_) => "Workload",
            Manifest::InternalService(_) => "InternalService",
            Manifest::Ingress(_) => "Ingress",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Manifest::Namespace(m) => &m.name,
            Manifest::ConfigMap(m) => &m.name,
            Manifest::StorageClaim(m) => &m.name,
            Manifest::Workload(m) => &m.name,
            Manifest::InternalService(m) => &m.name,
            Manifest::Ingress(m) => &m.name,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            Manifest::Namespace(m) => &m.name,
            Manifest::ConfigMap(m) => &m.namespace,
            Manifest::StorageClaim(m) => &m.namespace,
            Manifest::Workload(m) => &m.namespace,
            Manifest::InternalService(m) => &m.namespace,
            Manifest::Ingress(m) => &m.namespace,
        }
    }
}

/// Resource sizing per plan tier. `spec.md` leaves concrete quantities
/// unspecified; this table is the single place they are fixed.
fn resource_profile(plan: &ServicePlan) -> (&'static str, &'static str) {
    use gridkeep_domain_models::PlanType::*;
    match plan.plan_type {
        Free => ("250m", "256Mi"),
        Basic => ("500m", "512Mi"),
        Pro => ("1", "1Gi"),
        Premium => ("2", "2Gi"),
        Enterprise => ("4", "4Gi"),
    }
}

/// Lowercases, collapses any run of non-`[a-z0-9-]` characters to a single
/// `-`, trims leading/trailing dashes, and caps the result at 63 characters
/// (`spec.md` §4.5).
pub fn sanitize_name(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut last_was_dash = false;
    for ch in input.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch);
            last_was_dash = false;
        } else if !last_was_dash {
            result.push('-');
            last_was_dash = true;
        }
    }
    result.trim_matches('-').chars().take(63).collect()
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut buffer = Vec::new();
    while value > 0 {
        buffer.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buffer.reverse();
    String::from_utf8(buffer).expect("base36 alphabet is ASCII")
}

/// The deterministic resource name the workload, config map, storage
/// claim, internal service and ingress all derive from.
pub fn instance_resource_name(instance_id: &str) -> String {
    sanitize_name(&format!("svc-{}", instance_id))
}

/// `<slug>-<last6(userId)>-<base36(ts)>.<zone>` (`spec.md` §4.5).
pub fn generate_subdomain(service_slug: &str, user_id: &str, created_at: DateTime<Utc>, zone: &str) -> String {
    let tail_start = user_id.len().saturating_sub(6);
    let user_suffix = sanitize_name(&user_id[tail_start..]);
    let timestamp = to_base36(created_at.timestamp().max(0) as u64);
    format!("{}-{}-{}.{}", sanitize_name(service_slug), user_suffix, timestamp, zone)
}

/// Pure function `generate(service, plan, instance) -> ordered manifests`
/// (`spec.md` §4.5): namespace, config map, a conditional storage claim,
/// the workload, its internal service, then an ingress with TLS when
/// `instance.ssl_enabled`.
pub fn generate(service: &Service, plan: &ServicePlan, instance: &ServiceInstance) -> Vec<Manifest> {
    let resource_name = instance_resource_name(&instance.id);
    let namespace = sanitize_name(&format!("user-{}", instance.user_id));
    let (cpu_limit, memory_limit) = resource_profile(plan);

    let mut manifests = Vec::with_capacity(6);

    manifests.push(Manifest::Namespace(NamespaceManifest {
        name: namespace.clone(),
        labels: json!({ "gridkeep.io/managed": "true", "gridkeep.io/user-id": instance.user_id }),
    }));

    let config_map_name = format!("{}-config", resource_name);
    manifests.push(Manifest::ConfigMap(ConfigMapManifest {
        name: config_map_name.clone(),
        namespace: namespace.clone(),
        data: json!({
            "INSTANCE_ID": instance.id,
            "INSTANCE_NAME": resource_name,
            "SUBDOMAIN": instance.subdomain,
            "PUBLIC_URL": instance.public_url,
        }),
    }));

    let storage_claim_name = if plan.storage_gb > 0 {
        let name = format!("{}-pvc", resource_name);
        manifests.push(Manifest::StorageClaim(StorageClaimManifest {
            name: name.clone(),
            namespace: namespace.clone(),
            access_mode: "ReadWriteOnce".to_string(),
            size: format!("{}Gi", plan.storage_gb),
        }));
        Some(name)
    } else {
        None
    };

    let labels = json!({ "app": service.slug, "instance": instance.id });
    manifests.push(Manifest::Workload(WorkloadManifest {
        name: resource_name.clone(),
        namespace: namespace.clone(),
        plan_type: format!("{:?}", plan.plan_type).to_lowercase(),
        image: service.docker_image.clone(),
        cpu_limit: cpu_limit.to_string(),
        memory_limit: memory_limit.to_string(),
        replicas: 1,
        port: WORKLOAD_PORT,
        env: json!({ "config_map": config_map_name }),
        storage_claim: storage_claim_name,
        labels: labels.clone(),
    }));

    let internal_service_name = format!("{}-svc", resource_name);
    manifests.push(Manifest::InternalService(InternalServiceManifest {
        name: internal_service_name.clone(),
        namespace: namespace.clone(),
        selector: labels,
        port: 80,
        target_port: WORKLOAD_PORT,
    }));

    manifests.push(Manifest::Ingress(IngressManifest {
        name: format!("{}-ingress", resource_name),
        namespace,
        host: instance.subdomain.clone(),
        backend_service: internal_service_name,
        tls_secret_name: instance.ssl_enabled.then(|| format!("{}-tls", resource_name)),
    }));

    manifests
}
