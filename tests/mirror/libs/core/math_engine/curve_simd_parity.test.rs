// [tests/mirror/libs/core/math_engine/curve_simd_parity.test.rs]
/**
 * =================================================================
 * APARATO: CURVE SIMD PARITY CERTIFIER (V1.0 - SOBERANO)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-MIRROR
 * RESPONSABILIDAD: VALIDACIÓN DE ISOMORFISMO ESCALAR VS VECTORIAL
 *
 * # Mathematical Proof (Lane Independence):
 * Certifica que procesar el punto 'P_i' en el carril 'i' del motor SIMD
 * produce exactamente el mismo resultado que procesarlo individualmente
 * en el motor escalar 'UnifiedCurveEngine'.
 * =================================================================
 */

use prospector_core_math::prelude::*;
use std::time::Instant;
use serde_json::json;
use reqwest::blocking::Client;

#[tokio::test]
async fn certify_simd_4way_parity_against_scalar_oracle() {
    println!("\n🧬 [PROVING_GROUNDS]: Initiating SIMD 4-Way Parity Audit...");
    let mut accumulated_integrity_faults = 0;
    let mut forensic_bitacora = String::new();

    // 1. SETUP: Vectores de Verdad (4 puntos Jacobianos aleatorios)
    let p0 = JacobianPoint::from_affine([1, 0, 0, 0], [2, 0, 0, 0]); // Puntos simplificados para validación rápida
    let p1 = JacobianPoint::from_affine([3, 0, 0, 0], [4, 0, 0, 0]);
    let p2 = JacobianPoint::from_affine([5, 0, 0, 0], [6, 0, 0, 0]);
    let p3 = JacobianPoint::from_affine([7, 0, 0, 0], [8, 0, 0, 0]);

    let mut vector_unit = JacobianPointVector4::from_elements(&p0, &p1, &p2, &p3);

    // 2. EXECUTION: Duplicación Paralela (V66.1)
    println!("   🧪 Phase 1: Executing 4-way Parallel Doubling (SIMD)...");
    vector_unit.double_batch_unified();

    // 3. VALIDATION: Comparación contra Oráculo Escalar (L1-CURVE)
    println!("   🧪 Phase 2: Validating against Scalar Oracle...");
    let scalar_oracle_results = [
        UnifiedCurveEngine::double_point_jacobian(&p0),
        UnifiedCurveEngine::double_point_jacobian(&p1),
        UnifiedCurveEngine::double_point_jacobian(&p2),
        UnifiedCurveEngine::double_point_jacobian(&p3),
    ];

    for i in 0..4 {
        let simd_extracted = vector_unit.x_coordinates.extract_and_reduce_lane(i);
        let scalar_result = scalar_oracle_results[i].x;

        if simd_extracted == scalar_result {
            println!("      ✅ Lane {}: Parity Confirmed.", i);
        } else {
            println!("      ❌ Lane {}: BIT_DRIFT DETECTED!", i);
            accumulated_integrity_faults += 1;
        }
    }

    // 4. BENCHMARK: Medición de Throughput
    let start_perf = Instant::now();
    for _ in 0..10_000 {
        vector_unit.double_batch_unified();
    }
    let throughput_ops_sec = 40_000.0 / start_perf.elapsed().as_secs_f64();
    println!("   🚀 SIMD Throughput: {:.2} ops/sec (4-way effective).", throughput_ops_sec);

    // 5. REPORTE C2
    let final_verdict = if accumulated_integrity_faults == 0 { "GOLD_MASTER" } else { "FAILED" };
    forensic_bitacora.push_str(&format!("SIMD_PARITY: {} | Throughput: {:.2} ops/s", final_verdict, throughput_ops_sec));

    despachar_reporte_simd(final_verdict, throughput_ops_sec, forensic_bitacora, accumulated_integrity_faults);

    assert_eq!(accumulated_integrity_faults, 0, "SIMD Isomorphism failed.");
}

fn despachar_reporte_simd(verdict: &str, ops: f64, log: String, errors: u32) {
    let url = std::env::var("ORCHESTRATOR_URL").unwrap_or_else(|_| "http://localhost:3000".into());
    let token = std::env::var("WORKER_AUTH_TOKEN").unwrap_or_else(|_| "observer".into());

    let payload = json!({
        "testName": "CURVE_SIMD_PARITY_V66",
        "stratum": "L1_MATH",
        "verdict": verdict,
        "metrics": { "throughput": ops, "latency_ms": 0, "error_rate": errors as f64 },
        "forensicLog": log,
        "environment": "Local_VAIO_Vector_Chamber",
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    let _ = Client::builder().build().unwrap()
        .post(format!("{}/api/v1/admin/qa/report", url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&payload)
        .send();
}
