#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Attempt to deserialize arbitrary bytes as the persisted registry types.
    // The goal is to ensure deserialization never panics on malformed input.

    // Try deserializing as a full officer record
    let _ = bincode::deserialize::<lendra_store::OfficerRecord>(data);

    // Try deserializing as bare metrics
    let _ = bincode::deserialize::<lendra_store::OfficerMetrics>(data);

    // Try deserializing as a CallerId
    let _ = bincode::deserialize::<lendra_types::CallerId>(data);

    // Try deserializing as a LicenseNumber
    let _ = bincode::deserialize::<lendra_types::LicenseNumber>(data);

    // Try deserializing as a LedgerTime
    let _ = bincode::deserialize::<lendra_types::LedgerTime>(data);

    // Try deserializing as a registry event
    let _ = bincode::deserialize::<lendra_registry::RegistryEvent>(data);
});
