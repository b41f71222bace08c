// xt-entropy-core/src/volume_key.rs
//! Derivation of the registry key of a volume from its display names.

/// Characters that cannot appear in a file name on the host platform.
const RESERVED_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Derives the normalized registry key of a volume.
///
/// When `long_name` does not contain `short_name`, the short name carries a
/// trailing qualifier that is cut at the last `", "`. A pair at the very start
/// of the name is never treated as a separator. Reserved characters are then
/// replaced with `_`.
pub fn derive_volume_key(long_name: &str, short_name: &str) -> String {
    let mut key = short_name.to_string();

    if !long_name.contains(short_name) {
        if let Some(pos) = key.rfind(", ") {
            if pos > 0 {
                key.truncate(pos);
            }
        }
    }

    sanitize_key(&key)
}

/// Replaces each reserved character with `_`.
pub fn sanitize_key(name: &str) -> String {
    name.chars()
        .map(|c| if RESERVED_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_inside_long_name_is_kept() {
        assert_eq!(derive_volume_key("disk.e01, Partition 1", "disk.e01"), "disk.e01");
        assert_eq!(derive_volume_key("Case, a, b", "Case, a"), "Case, a");
    }

    #[test]
    fn test_truncates_at_last_comma_space() {
        assert_eq!(derive_volume_key("Image 1", "Img, P1, NTFS"), "Img, P1");
        assert_eq!(derive_volume_key("Image 1", "Img, P1"), "Img");
    }

    #[test]
    fn test_no_separator_leaves_name() {
        assert_eq!(derive_volume_key("Image 1", "Img,P1"), "Img,P1");
        assert_eq!(derive_volume_key("Image 1", "Img"), "Img");
    }

    #[test]
    fn test_leading_separator_is_not_cut() {
        assert_eq!(derive_volume_key("Image 1", ", tail"), ", tail");
        assert_eq!(derive_volume_key("Image 1", "a, "), "a");
    }

    #[test]
    fn test_reserved_characters_replaced() {
        assert_eq!(derive_volume_key(r"C:\x", r"C:\x"), "C__x");
        assert_eq!(sanitize_key(r#"a/b*c?d"e<f>g|h"#), "a_b_c_d_e_f_g_h");
    }

    #[test]
    fn test_non_ascii_names() {
        assert_eq!(derive_volume_key("Datenträger", "Bild, Teil 1"), "Bild");
        assert_eq!(derive_volume_key("ボリューム", "ボリューム"), "ボリューム");
    }
}
