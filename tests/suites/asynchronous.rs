use crate::common::{png_dimensions, small_options};
use mavecaptcha::{CaptchaError, CaptchaGenerator, FontSource, Options};
use std::sync::Arc;

#[tokio::test]
async fn test_generate_async() {
    let generator = Arc::new(CaptchaGenerator::default());
    let options = Options {
        use_identifier: true,
        ..small_options()
    };

    let captcha = generator.generate_async(options).await.unwrap();
    assert_eq!(captcha.value().len(), 5);
    assert_eq!(png_dimensions(captcha.image_reference()), (240, 80));
}

#[tokio::test]
async fn test_generate_async_many() {
    let generator = Arc::new(CaptchaGenerator::default());

    let handles: Vec<_> = (0..6)
        .map(|_| tokio::spawn(Arc::clone(&generator).generate_async(small_options())))
        .collect();

    for handle in handles {
        let captcha = handle.await.unwrap().unwrap();
        assert_eq!(captcha.value().len(), 5);
    }
    assert_eq!(generator.fonts().cached_size(), Some(32.0));
}

#[tokio::test]
async fn test_generate_async_propagates_errors() {
    let generator = Arc::new(CaptchaGenerator::from_source(FontSource::Path(
        "/nonexistent/font.ttf".into(),
    )));

    let err = generator.generate_async(small_options()).await.unwrap_err();
    assert!(matches!(err, CaptchaError::FontLoad(_)));
}
