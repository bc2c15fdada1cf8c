use rand::RngCore;
use rand::seq::SliceRandom;

/// Name-provider collaborator: returns one display name per generated card.
///
/// The `family` token is advisory; providers may condition the pick on it or
/// ignore it.
pub trait NameSource {
    fn pick(&self, family: Option<&str>, rng: &mut dyn RngCore) -> String;
}

/// Feminine given names used for generated characters.
static GIVEN_NAMES: &[&str] = &[
    "Ageha", "Ai", "Aika", "Aiko", "Aimi", "Aina", "Airi", "Akane", "Akari", "Akemi", "Aki",
    "Akiko", "Akina", "Ako", "Amane", "Ami", "Anju", "Anna", "Anzu", "Arisa", "Asaka", "Asami",
    "Asuka", "Asuna", "Atsuko", "Aya", "Ayaka", "Ayako", "Ayame", "Ayana", "Ayane", "Ayano",
    "Ayumi", "Azumi", "Chie", "Chieko", "Chiho", "Chika", "Chiyo", "Eiko", "Ema", "Emi", "Emiko",
    "Emiri", "Eri", "Erika", "Eriko", "Erina", "Etsuko", "Fubuki", "Fujiko", "Fumiko", "Futaba",
    "Fuyumi", "Ginko", "Hana", "Hanae", "Hanako", "Haruhi", "Haruko", "Haruna", "Hideko",
    "Himiko", "Hina", "Hinako", "Hiroko", "Hisako", "Hitomi", "Hiyori", "Honoka", "Ichigo",
    "Ikumi", "Inori", "Iroha", "Isuzu", "Itsumi", "Junko", "Juri", "Kaede", "Kaho", "Kana",
    "Kanae", "Kanako", "Kanna", "Kanon", "Kaori", "Karen", "Karin", "Kasumi", "Kaya", "Kazuko",
    "Keiko", "Kiku", "Kikuko", "Kimiko", "Kira", "Kirari", "Kirika", "Kiriko", "Kiyoko", "Mai",
    "Maiko", "Mako", "Makoto", "Mami", "Mana", "Manami", "Mao", "Mari", "Mariko", "Marina",
    "Maya", "Mayu", "Mayumi", "Megumi", "Mei", "Midori", "Miho", "Mika", "Miki", "Mikoto",
    "Miku", "Misaki", "Misato", "Miu", "Miyako", "Miyuki", "Mizuki", "Moe", "Momiji", "Momoka",
    "Momoko", "Nagisa", "Nami", "Nana", "Nanako", "Nanami", "Nao", "Naoko", "Naomi", "Natsuki",
    "Natsumi", "Nene", "Nina", "Noriko", "Nozomi", "Ran", "Rei", "Reika", "Reiko", "Rena",
    "Rika", "Riko", "Rin", "Rina", "Rio", "Risa", "Ritsuko", "Rumi", "Ruri", "Ryoko", "Sachi",
    "Saeko", "Sakura", "Sana", "Sanae", "Sayaka", "Sayuri", "Sena", "Setsu", "Shiho", "Shino",
    "Shiori", "Shoko", "Sora", "Suzu", "Suzuka", "Suzume", "Taeko", "Takako", "Tamaki", "Tamao",
    "Teruko", "Tomoe", "Tomoka", "Tomoko", "Tomomi", "Tsugumi", "Ui", "Ume", "Umeko", "Urara",
    "Usagi", "Wakana", "Yae", "Yasuko", "Yoko", "Yoriko", "Yoshimi", "Yuka", "Yukari", "Yukiko",
    "Yukino", "Yumi", "Yumiko", "Yuna", "Yuriko", "Yuri", "Yuzuki", "Zenko",
];

/// Built-in name provider backed by the static name list.
///
/// Ignores the family token; every family draws from the same pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct NameList;

impl NameSource for NameList {
    fn pick(&self, _family: Option<&str>, rng: &mut dyn RngCore) -> String {
        GIVEN_NAMES
            .choose(rng)
            .copied()
            .unwrap_or("Unknown")
            .to_string()
    }
}
