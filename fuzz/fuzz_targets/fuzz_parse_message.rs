#![no_main]

use libfuzzer_sys::fuzz_target;
use maxrf_rs::{parse, DeviceRegistry, Receiver};

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must never panic or overfill the registry
    let mut registry = DeviceRegistry::new(2);
    if let Some(message) = parse(data, &mut registry) {
        let _ = message.into_owned();
    }
    assert!(registry.len() <= 2);

    // Same bytes treated as a whitened on-air frame
    let mut receiver = Receiver::new(DeviceRegistry::new(2));
    let mut frame = data.to_vec();
    let _ = receiver.receive(&mut frame);

    let stats = receiver.stats();
    assert_eq!(stats.frames_received, 1);
    assert!(stats.frames_decoded <= 1);
});
