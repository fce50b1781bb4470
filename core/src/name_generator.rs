//! Deterministic volunteer names for synthetic rosters.
//!
//! Same RNG seed = same names. Contact fields are placeholders derived
//! from the name and never point at a real mailbox or phone line.

use crate::{rng::SolveRng, types::PersonId};

/// Deterministic name generator using curated name lists
pub struct NameGenerator;

impl NameGenerator {
    /// Family name first, as on school rosters.
    pub fn generate_full_name(rng: &mut SolveRng) -> String {
        let family_name = Self::generate_family_name(rng);
        let given_name = Self::generate_given_name(rng);
        format!("{family_name} {given_name}")
    }

    pub fn generate_given_name(rng: &mut SolveRng) -> &'static str {
        Self::pick(rng, Self::given_names())
    }

    pub fn generate_family_name(rng: &mut SolveRng) -> &'static str {
        Self::pick(rng, Self::family_names())
    }

    /// Placeholder address under the reserved `example.org` domain.
    pub fn placeholder_email(id: PersonId, name: &str) -> String {
        let local: String = name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(".")
            .to_ascii_lowercase();
        format!("{local}.{id}@example.org")
    }

    /// Placeholder number in the unassigned 000 block.
    pub fn placeholder_phone(id: PersonId) -> String {
        format!("000-{:04}-{:04}", (id / 10_000) % 10_000, id % 10_000)
    }

    fn pick(rng: &mut SolveRng, names: &'static [&'static str]) -> &'static str {
        let index = rng.next_u64_below(names.len() as u64) as usize;
        names[index]
    }

    fn family_names() -> &'static [&'static str] {
        &[
            "Sato", "Suzuki", "Takahashi", "Tanaka", "Watanabe", "Ito", "Yamamoto",
            "Nakamura", "Kobayashi", "Kato", "Yoshida", "Yamada", "Sasaki", "Yamaguchi",
            "Matsumoto", "Inoue", "Kimura", "Hayashi", "Shimizu", "Yamazaki", "Mori",
            "Abe", "Ikeda", "Hashimoto", "Yamashita", "Ishikawa", "Nakajima", "Maeda",
            "Fujita", "Ogawa", "Goto", "Okada", "Hasegawa", "Murakami", "Kondo",
            "Ishii", "Saito", "Sakamoto", "Endo", "Aoki", "Fujii", "Nishimura",
            "Fukuda", "Ota", "Miura", "Okamoto", "Matsuda", "Nakagawa", "Harada",
            "Ono", "Tamura", "Takeuchi", "Kaneko", "Wada", "Nakayama", "Ishida",
            "Ueda", "Morita", "Hara", "Shibata", "Sakai", "Kudo", "Yokoyama",
            "Miyazaki", "Miyamoto", "Uchida", "Takagi", "Ando", "Taniguchi", "Ohno",
            "Maruyama", "Imai", "Takada", "Fujimoto", "Takeda", "Murata", "Ueno",
            "Sugiyama", "Masuda", "Sugawara", "Hirano", "Kojima", "Otsuka", "Chiba",
            "Kubo", "Matsui", "Iwasaki", "Sakurai", "Kinoshita", "Noguchi", "Matsuo",
            "Nomura", "Kikuchi", "Sano", "Onishi", "Sugimoto", "Arai", "Hamada",
        ]
    }

    fn given_names() -> &'static [&'static str] {
        &[
            "Haruto", "Yuto", "Sota", "Yuki", "Hayato", "Haruki", "Ryusei", "Koki",
            "Sora", "Sosuke", "Riku", "Kaito", "Takumi", "Ren", "Daiki", "Kenta",
            "Shota", "Naoki", "Kazuki", "Takeshi", "Hiroshi", "Makoto", "Satoshi",
            "Kenji", "Akira", "Masato", "Tomoya", "Yusuke", "Daisuke", "Ryota",
            "Yui", "Aoi", "Hina", "Sakura", "Mio", "Rin", "Yuna", "Koharu", "Mei",
            "Saki", "Misaki", "Ayaka", "Nanami", "Haruka", "Miyu", "Kana", "Emi",
            "Yoko", "Keiko", "Naoko", "Tomoko", "Akiko", "Yumiko", "Megumi", "Kumiko",
            "Mariko", "Noriko", "Sachiko", "Chika", "Asuka", "Eri", "Mayumi", "Rie",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, RngStream};

    #[test]
    fn name_generation_is_deterministic() {
        let mut rng1 = RngBank::new(12345).for_stream(RngStream::Roster);
        let mut rng2 = RngBank::new(12345).for_stream(RngStream::Roster);

        let name1 = NameGenerator::generate_full_name(&mut rng1);
        let name2 = NameGenerator::generate_full_name(&mut rng2);

        assert_eq!(name1, name2, "Same seed should produce same name");
    }

    #[test]
    fn generates_two_part_names() {
        let mut rng = RngBank::new(12345).for_stream(RngStream::Roster);
        for _ in 0..100 {
            let name = NameGenerator::generate_full_name(&mut rng);
            let parts: Vec<&str> = name.split_whitespace().collect();
            assert_eq!(parts.len(), 2, "Name should have exactly 2 parts: {name}");
        }
    }

    #[test]
    fn placeholder_contacts_are_stable() {
        assert_eq!(
            NameGenerator::placeholder_email(7, "Sato Yui"),
            "sato.yui.7@example.org"
        );
        assert_eq!(NameGenerator::placeholder_phone(123), "000-0000-0123");
    }
}
