use workshift::utils::color::*;

#[test]
fn test_normalize_hex() {
    assert_eq!(normalize_hex("#AABBCC").as_deref(), Some("#aabbcc"));
    assert_eq!(normalize_hex(" #0af ").as_deref(), Some("#00aaff"));
    assert_eq!(normalize_hex("aabbcc"), None);
    assert_eq!(normalize_hex("#abcd"), None);
    assert_eq!(normalize_hex("#ggghhh"), None);
}

#[test]
fn test_resolve_label_color() {
    assert_eq!(resolve_label_color("green").as_deref(), Some("#61bd4f"));
    assert_eq!(resolve_label_color(" RED ").as_deref(), Some("#eb5a46"));
    assert_eq!(resolve_label_color("gray"), resolve_label_color("grey"));
    assert_eq!(resolve_label_color("#FFF").as_deref(), Some("#ffffff"));
    assert_eq!(resolve_label_color("mauve"), None);
}

#[test]
fn test_palette_name() {
    assert_eq!(palette_name("#61BD4F"), Some("green"));
    assert_eq!(palette_name("#b3bac5"), Some("grey"));
    assert_eq!(palette_name("#123456"), None);
}

#[test]
fn test_palette_colors_are_normalized() {
    for (name, hex) in LABEL_PALETTE {
        assert_eq!(normalize_hex(hex).as_deref(), Some(*hex), "{} is not normalized", name);
    }
    assert!(normalize_hex(DEFAULT_LABEL_COLOR).is_some());
}
