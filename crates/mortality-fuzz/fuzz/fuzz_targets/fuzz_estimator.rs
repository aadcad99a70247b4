#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_mortality::estimator::{DeathDefinition, Window};

fuzz_target!(|data: &[u8]| {
    // Layout: width, threshold, two bytes of birth year, then one signed byte
    // per citation as an offset from birth.
    let [width, threshold, hi, lo, rest @ ..] = data else {
        return;
    };
    let Ok(window) = Window::new(u32::from(*width), u32::from(*threshold)) else {
        return;
    };
    let birth = 1900 + i32::from(u16::from_be_bytes([*hi, *lo]) % 200);
    let years: Vec<i32> = rest.iter().map(|&b| birth + i32::from(b as i8)).collect();

    for definition in [DeathDefinition::SlidingWindow, DeathDefinition::LastCited] {
        let death = definition.death_year(window, &years, birth);
        assert!(death >= birth, "{definition:?} died at {death} before birth {birth}");
    }
});
