use crate::common::{png_dimensions, small_options};
use image::Rgb;
use mavecaptcha::render::characters::{LETTERS, NUMBERS};
use mavecaptcha::render::encoder::DATA_URI_PREFIX;
use mavecaptcha::{BackgroundStyle, CaptchaError, CaptchaGenerator, Options, RandomSource};

#[test]
fn test_default_options_produce_full_size_image() {
    let generator = CaptchaGenerator::default();
    let captcha = generator.generate(&Options::default()).unwrap();

    assert_eq!(captcha.value().chars().count(), 7);
    assert!(captcha.identifier().is_empty());
    assert!(captcha.image_reference().starts_with(DATA_URI_PREFIX));
    assert_eq!(png_dimensions(captcha.image_reference()), (800, 200));
}

#[test]
fn test_value_uses_challenge_alphabets() {
    let generator = CaptchaGenerator::default();
    for _ in 0..10 {
        let captcha = generator.generate(&small_options()).unwrap();
        assert!(
            captcha
                .value()
                .chars()
                .all(|c| LETTERS.contains(&c) || NUMBERS.contains(&c))
        );
    }
}

#[test]
fn test_letter_ratio_extremes() {
    let generator = CaptchaGenerator::default();

    let letters_only = Options {
        letter_ratio: Some(1.0),
        ..small_options()
    };
    let captcha = generator.generate(&letters_only).unwrap();
    assert!(captcha.value().chars().all(|c| LETTERS.contains(&c)));

    let digits_only = Options {
        letter_ratio: Some(0.0),
        ..small_options()
    };
    let captcha = generator.generate(&digits_only).unwrap();
    assert!(captcha.value().chars().all(|c| NUMBERS.contains(&c)));
}

#[test]
fn test_scattered_circles_with_identifier() {
    let generator = CaptchaGenerator::default();
    let options = Options {
        background_style: Some(BackgroundStyle::ScatteredCircles),
        background_color: Some(Rgb([40, 90, 200])),
        text_color: Some(Rgb([255, 255, 255])),
        use_identifier: true,
        ..small_options()
    };

    let captcha = generator.generate(&options).unwrap();
    assert_eq!(captcha.identifier().split('-').count(), 7);
    assert_eq!(png_dimensions(captcha.image_reference()), (240, 80));
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let generator = CaptchaGenerator::default();
    let options = Options {
        background_style: Some(BackgroundStyle::ScatteredCircles),
        ..small_options()
    };

    let a = generator
        .generate_with(&options, &mut RandomSource::from_seed(2024))
        .unwrap();
    let b = generator
        .generate_with(&options, &mut RandomSource::from_seed(2024))
        .unwrap();
    let c = generator
        .generate_with(&options, &mut RandomSource::from_seed(2025))
        .unwrap();

    assert_eq!(a.value(), b.value());
    assert_eq!(a.image_reference(), b.image_reference());
    assert_ne!(a.image_reference(), c.image_reference());
}

#[test]
fn test_zero_means_default() {
    let generator = CaptchaGenerator::default();
    let options = Options {
        width: Some(0),
        height: Some(0),
        character_count: Some(0),
        font_size: Some(0.0),
        ..Default::default()
    };

    let captcha = generator.generate(&options).unwrap();
    assert_eq!(captcha.value().len(), 7);
    assert_eq!(png_dimensions(captcha.image_reference()), (800, 200));
}

#[test]
fn test_invalid_options() {
    let generator = CaptchaGenerator::default();

    for options in [
        Options {
            letter_ratio: Some(f64::NAN),
            ..small_options()
        },
        Options {
            font_size: Some(-4.0),
            ..small_options()
        },
        Options {
            width: Some(100_000),
            ..small_options()
        },
        Options {
            font_size: Some(1.0e30),
            character_count: Some(1),
            ..small_options()
        },
        Options {
            font_size: Some(5_000.0),
            ..small_options()
        },
    ] {
        assert!(matches!(
            generator.generate(&options),
            Err(CaptchaError::InvalidOptions(_))
        ));
    }
}

#[test]
fn test_largest_font_size_renders() {
    let generator = CaptchaGenerator::default();
    let options = Options {
        font_size: Some(mavecaptcha::config::options::MAX_FONT_SIZE),
        character_count: Some(1),
        ..small_options()
    };

    let captcha = generator.generate(&options).unwrap();
    assert_eq!(captcha.value().len(), 1);
    assert_eq!(png_dimensions(captcha.image_reference()), (240, 80));
}

#[test]
fn test_json_shape() {
    let generator = CaptchaGenerator::default();
    let options = Options {
        use_identifier: true,
        ..small_options()
    };
    let captcha = generator.generate(&options).unwrap();

    let json = serde_json::to_value(&captcha).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(object["value"], captcha.value());
    assert_eq!(object["identifier"], captcha.identifier());
    assert_eq!(object["imageReference"], captcha.image_reference());
}
