/**
 * =================================================================
 * APARATO: NEURAL SOCKET ASYNC TEST (V215.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L4-MIRROR
 * OBJETIVO: Certificar que el mando asíncrono no bloquea el socket.
 * =================================================================
 */
use tokio::sync::mpsc;

#[tokio::test]
async fn certify_asynchronous_command_queue_stability() {
    println!("\n🔌 [PROVING_GROUNDS]: WebSocket Asynchronous Dispatch Audit...");

    // 1. SETUP: Simular el canal de mando del nuevo handler
    let (tx, mut rx) = mpsc::channel::<String>(32);

    // 2. EXECUTION: Inyectar ráfaga de comandos
    for i in 0..10 {
        tx.send(format!(r#"{{"action": "IgniteSwarm", "id": {}}}"#, i)).await.unwrap();
    }

    // 3. VALIDATION: El receptor debe ser capaz de procesar sin que el emisor se bloquee
    let mut count = 0;
    while let Ok(msg) = tokio::time::timeout(std::time::Duration::from_millis(50), rx.recv()).await {
        if msg.is_some() { count += 1; }
        if count == 10 { break; }
    }

    assert_eq!(count, 10, "La cola de mando perdió ráfagas de sincronía.");
    println!("✅ SOCKET_V215: Internal Command Queue certified under burst load.");
}
