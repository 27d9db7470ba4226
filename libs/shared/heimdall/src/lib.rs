// [libs/shared/heimdall/src/lib.rs]
/*!
 * =================================================================
 * APARATO: OBSERVABILITY BEACON (V1.0)
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4/L6)
 * RESPONSABILIDAD: INICIALIZACIÓN DE TRAZADO Y CAPTURA DE PÁNICOS
 *
 * Dual-mode tracing bootstrap shared by every GridKeep binary: compact
 * human-readable output in development, flat JSON in release. Also
 * installs a global panic hook so a background daemon task that panics
 * is reported through the same pipeline instead of vanishing silently.
 * =================================================================
 */

use std::panic;
use tracing::{error, info, instrument};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as formatting_layer, EnvFilter};

/// Initializes the global tracing subscriber for `service_name`.
///
/// Honors `RUST_LOG` if set; otherwise defaults to `debug` for this
/// service's own spans and `warn`/`error` for noisy infrastructure crates.
///
/// # Panics
/// Panics if a global subscriber has already been installed.
#[instrument(skip_all)]
pub fn init_tracing(service_name: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{}={level},tower_http=warn,hyper=warn,libsql=error",
            service_name,
            level = if cfg!(debug_assertions) { "debug" } else { "info" }
        )
        .into()
    });

    if cfg!(debug_assertions) {
        tracing_subscriber::registry()
            .with(filter)
            .with(formatting_layer::layer().compact().with_target(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(formatting_layer::layer().json().flatten_event(true))
            .init();
    }

    install_panic_hook(service_name);

    info!("observability beacon initialized for [{}]", service_name);
}

fn install_panic_hook(service_name: &str) {
    let service_name = service_name.to_string();

    panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("non-string panic payload");

        error!(
            target: "panic_monitor",
            service = %service_name,
            location = %location,
            "thread panicked: {}",
            payload
        );
    }));
}
