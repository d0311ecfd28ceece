use crate::common::{png_dimensions, small_options, tracked_cache};
use mavecaptcha::{CaptchaGenerator, Options};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_mode_is_structurally_valid() {
    let generator = CaptchaGenerator::default();
    let options = Options {
        use_identifier: true,
        use_concurrency: true,
        ..small_options()
    };

    for _ in 0..5 {
        let captcha = generator.generate(&options).unwrap();
        assert_eq!(captcha.value().len(), 5);
        assert_eq!(captcha.identifier().split('-').count(), 7);
        assert_eq!(png_dimensions(captcha.image_reference()), (240, 80));
    }
}

#[test]
fn test_parallel_calls_share_one_face() {
    let (provider, cache) = tracked_cache();
    let generator = Arc::new(CaptchaGenerator::new(cache.clone()));
    let warm = cache.load(32.0).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || {
                let options = Options {
                    use_identifier: true,
                    use_concurrency: i % 2 == 0,
                    ..small_options()
                };
                generator.generate(&options).unwrap()
            })
        })
        .collect();

    let identifiers: HashSet<String> = handles
        .into_iter()
        .map(|h| h.join().unwrap().identifier().to_string())
        .collect();

    assert_eq!(identifiers.len(), 8);
    assert_eq!(provider.calls(), 1);
    assert!(Arc::ptr_eq(&warm, &cache.load(32.0).unwrap()));
}

#[test]
fn test_cold_parallel_calls_converge_on_one_face() {
    let (_provider, cache) = tracked_cache();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.load(40.0).unwrap())
        })
        .collect();
    let faces: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let installed = cache.load(40.0).unwrap();
    assert!(faces.iter().all(|f| Arc::ptr_eq(f, &installed)));
}
