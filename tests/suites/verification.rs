use crate::common::small_options;
use mavecaptcha::{Captcha, CaptchaGenerator, check_values};

#[test]
fn test_check_value_ignores_candidate_case() {
    let captcha = Captcha::new(String::new(), "A1B2C3D".to_string(), String::new());

    assert!(captcha.check_value("a1b2c3d"));
    assert!(captcha.check_value("A1B2C3D"));
    assert!(!captcha.check_value("A1B2C3E"));
    assert!(!captcha.check_value("A1B2C3"));
}

#[test]
fn test_stateless_check_matches_method() {
    let captcha = Captcha::new(String::new(), "XK7P9".to_string(), String::new());
    for candidate in ["xk7p9", "XK7P9", "xk7p8", "", "XK7P9 "] {
        assert_eq!(
            captcha.check_value(candidate),
            check_values("XK7P9", candidate)
        );
    }
}

#[test]
fn test_generated_value_verifies() {
    let generator = CaptchaGenerator::default();
    let captcha = generator.generate(&small_options()).unwrap();

    assert!(captcha.check_value(&captcha.value().to_lowercase()));
    assert!(check_values(captcha.value(), captcha.value()));
}
