// Song-title generation from narrative lyric themes.
//
// Titles are compounds of 1-2 words drawn from the constraint snapshot's
// lyric themes, falling back to a built-in word pool when the band's recent
// history produced no themes. The generator takes `&mut SeededRng` for
// deterministic output, matching the pipeline's determinism constraint.

use stagefright_prng::SeededRng;

/// Word pool used when the narrative produced no lyric themes.
const FALLBACK_WORDS: [&str; 12] = [
    "midnight", "static", "neon", "wreckage", "halo", "gasoline",
    "echoes", "velvet", "sirens", "ashes", "voltage", "mirrors",
];

/// Generate a song title from the lyric themes.
///
/// Forms, by roll: "The <Word>" (~30%), "<Word> <Word>" (~40%, distinct
/// words when the pool allows), or a single capitalized word.
pub fn generate_title(themes: &[String], rng: &mut SeededRng) -> String {
    let fallback: Vec<String> = FALLBACK_WORDS.iter().map(|w| (*w).to_string()).collect();
    let pool: &[String] = if themes.is_empty() { &fallback } else { themes };

    let form = rng.next_f64();
    if form < 0.3 {
        format!("The {}", capitalize(&pool[rng.next_index(pool.len())]))
    } else if form < 0.7 && pool.len() >= 2 {
        let first = rng.next_index(pool.len());
        let mut second = rng.next_index(pool.len());
        // Retry once on a duplicate; a doubled word is acceptable after that.
        if second == first {
            second = rng.next_index(pool.len());
        }
        format!("{} {}", capitalize(&pool[first]), capitalize(&pool[second]))
    } else {
        capitalize(&pool[rng.next_index(pool.len())])
    }
}

/// Capitalize the first character of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => {
            let upper: String = c.to_uppercase().collect();
            format!("{}{}", upper, chars.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("wreckage"), "Wreckage");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("A"), "A");
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let themes = vec!["darkness".to_string(), "escape".to_string()];
        let mut a = SeededRng::new("title-seed");
        let mut b = SeededRng::new("title-seed");
        assert_eq!(generate_title(&themes, &mut a), generate_title(&themes, &mut b));
    }

    #[test]
    fn empty_themes_use_fallback_pool() {
        let mut rng = SeededRng::new("no-themes");
        let title = generate_title(&[], &mut rng);
        assert!(!title.is_empty());
        assert!(title.starts_with(|c: char| c.is_uppercase()));
    }

    #[test]
    fn titles_vary_across_seeds() {
        let mut titles = std::collections::BTreeSet::new();
        for seed in 0..50 {
            let mut rng = SeededRng::new(&format!("variety-{seed}"));
            titles.insert(generate_title(&[], &mut rng));
        }
        assert!(
            titles.len() > 10,
            "expected >10 unique titles from 50 seeds, got {}",
            titles.len()
        );
    }

    #[test]
    fn themed_titles_draw_from_themes() {
        let themes: Vec<String> = vec!["debt".into(), "survival".into(), "desperation".into()];
        for seed in 0..20 {
            let mut rng = SeededRng::new(&format!("themed-{seed}"));
            let title = generate_title(&themes, &mut rng);
            let lowered = title.to_lowercase();
            assert!(
                themes.iter().any(|t| lowered.contains(t.as_str())),
                "title {title:?} uses no theme word"
            );
        }
    }
}
