// [libs/domain/models-rs/src/tests_serialization.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN SERIALIZATION TEST (INTEGRATION LEVEL)
 * CLASIFICACIÓN: ESTRATO L2-MODELS
 * RESPONSABILIDAD: PARIDAD JSON DE LAS ENTIDADES COMPARTIDAS
 * =================================================================
 */
