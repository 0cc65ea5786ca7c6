//! Taxonomy data.
//!
//! The first entry of every table is its fallback and matches the default
//! `StyleSelection`. Descriptions are prompt text and must stay unique across
//! tables.

use crate::StyleEntry;

const fn entry(
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    description: &'static str,
) -> StyleEntry {
    StyleEntry {
        id,
        label,
        icon,
        description,
    }
}

pub(crate) static GENRES: &[StyleEntry] = &[
    entry("drama", "Drama", "🎭", "character-driven drama grounded in believable human conflict"),
    entry("comedy", "Comedy", "😂", "light comedic storytelling with playful timing and visual gags"),
    entry("action", "Action", "💥", "high-stakes action with physical spectacle and clear geography"),
    entry("thriller", "Thriller", "🔪", "suspense thriller where danger is felt before it is seen"),
    entry("horror", "Horror", "👻", "atmospheric horror built on dread and the unseen"),
    entry("romance", "Romance", "💕", "romantic story focused on intimacy and longing between characters"),
    entry("sci-fi", "Science Fiction", "🚀", "science fiction with speculative technology and worlds"),
    entry("fantasy", "Fantasy", "🐉", "fantasy tale with mythical creatures and enchanted places"),
    entry("documentary", "Documentary", "🎥", "observational documentary presenting real-world subjects honestly"),
    entry("mystery", "Mystery", "🔍", "mystery that plants clues and withholds the answer"),
    entry("adventure", "Adventure", "🧭", "journey-driven adventure across varied landscapes"),
    entry("family", "Family", "👨‍👩‍👧", "warm family-friendly story suitable for all ages"),
];

pub(crate) static MOODS: &[StyleEntry] = &[
    entry("uplifting", "Uplifting", "🌅", "hopeful and uplifting emotional tone"),
    entry("melancholic", "Melancholic", "🌧", "quiet melancholy and bittersweet reflection"),
    entry("tense", "Tense", "😰", "taut, nervous tension that never fully releases"),
    entry("whimsical", "Whimsical", "🎈", "whimsical, curious and lighthearted feeling"),
    entry("mysterious", "Mysterious", "🌫", "enigmatic atmosphere full of unanswered questions"),
    entry("romantic", "Romantic", "🌹", "tender, affectionate emotional warmth"),
    entry("epic", "Epic", "⚔", "grand, awe-inspiring sense of scale and destiny"),
    entry("calm", "Calm", "🍃", "serene, meditative stillness"),
    entry("dark", "Dark", "🌑", "somber, ominous heaviness"),
];

pub(crate) static VISUAL_STYLES: &[StyleEntry] = &[
    entry("cinematic", "Cinematic", "🎬", "cinematic live-action look with shallow depth of field and film grain"),
    entry("photorealistic", "Photorealistic", "📷", "photorealistic rendering indistinguishable from a photograph"),
    entry("anime", "Anime", "🌸", "Japanese anime illustration with clean line art and cel shading"),
    entry("3d-animation", "3D Animation", "🧸", "polished 3D animated feature look with soft subsurface shading"),
    entry("watercolor", "Watercolor", "🎨", "hand-painted watercolor with soft bleeding edges and paper texture"),
    entry("oil-painting", "Oil Painting", "🖼", "classical oil painting with visible impasto brushwork"),
    entry("film-noir", "Film Noir", "🕵", "1940s film noir look with hard shadows and venetian blind patterns"),
    entry("comic-book", "Comic Book", "💬", "bold comic book inking with halftone dots and flat color"),
    entry("cyberpunk", "Cyberpunk", "🌃", "cyberpunk aesthetic with holographic signage and rain-slick chrome"),
    entry("claymation", "Claymation", "🧱", "stop-motion clay models with fingerprint texture and miniature sets"),
];

pub(crate) static LIGHTING: &[StyleEntry] = &[
    entry("natural", "Natural", "☀", "natural available light with realistic falloff"),
    entry("golden-hour", "Golden Hour", "🌇", "warm low-angle golden sunlight with long shadows"),
    entry("low-key", "Low Key", "🌘", "low-key lighting with deep blacks and a single hard source"),
    entry("high-key", "High Key", "💡", "bright high-key lighting with minimal shadows"),
    entry("neon", "Neon", "🔮", "saturated neon practicals casting magenta and cyan light"),
    entry("candlelight", "Candlelight", "🕯", "flickering candlelight glow on faces in darkness"),
    entry("overcast", "Overcast", "☁", "soft diffused overcast light with no hard shadows"),
    entry("backlit", "Backlit", "🌄", "strong backlight rimming subjects in silhouette"),
];

pub(crate) static CAMERA_ANGLES: &[StyleEntry] = &[
    entry("eye-level", "Eye Level", "👁", "camera at eye level for a neutral, relatable view"),
    entry("low-angle", "Low Angle", "⬆", "camera below the subject looking up to make it imposing"),
    entry("high-angle", "High Angle", "⬇", "camera above the subject looking down to make it small"),
    entry("birds-eye", "Bird's Eye", "🦅", "top-down overhead view directly above the scene"),
    entry("dutch", "Dutch Angle", "📐", "tilted horizon creating unease"),
    entry("over-shoulder", "Over the Shoulder", "🗣", "framed over one character's shoulder toward another"),
    entry("worms-eye", "Worm's Eye", "🐛", "extreme ground-level view looking straight up"),
    entry("pov", "Point of View", "🎯", "first-person view through the character's eyes"),
];

pub(crate) static SHOT_SIZES: &[StyleEntry] = &[
    entry("medium", "Medium", "🧍", "medium shot framing the subject from the waist up"),
    entry("extreme-wide", "Extreme Wide", "🏞", "extreme wide establishing shot where the subject is tiny in the landscape"),
    entry("wide", "Wide", "🌄", "wide shot showing the full subject within its environment"),
    entry("full", "Full", "🚶", "full shot framing the subject head to toe"),
    entry("medium-close", "Medium Close-Up", "🙂", "medium close-up framing head and shoulders"),
    entry("close-up", "Close-Up", "👤", "close-up filling the frame with the subject's face"),
    entry("extreme-close-up", "Extreme Close-Up", "👁‍🗨", "extreme close-up on a single detail such as the eyes"),
];

pub(crate) static CAMERA_MOVEMENTS: &[StyleEntry] = &[
    entry("static", "Static", "📌", "locked-off camera that does not move"),
    entry("pan", "Pan", "↔", "smooth horizontal pan across the action"),
    entry("tilt", "Tilt", "↕", "vertical tilt revealing the subject from bottom to top"),
    entry("dolly-in", "Dolly In", "➡", "slow push in toward the subject"),
    entry("dolly-out", "Dolly Out", "⬅", "gradual pull back revealing the surroundings"),
    entry("tracking", "Tracking", "🏃", "tracking move following the subject as it travels"),
    entry("crane", "Crane", "🏗", "sweeping crane rise lifting over the scene"),
    entry("handheld", "Handheld", "🤳", "handheld camera with organic shake and drift"),
    entry("orbit", "Orbit", "🔄", "circular orbit around the subject"),
    entry("zoom", "Zoom", "🔭", "optical zoom tightening on the focal point"),
];

pub(crate) static PACING: &[StyleEntry] = &[
    entry("moderate", "Moderate", "⏯", "steady, even rhythm with unhurried beats"),
    entry("slow", "Slow", "🐢", "lingering, contemplative rhythm that lets moments breathe"),
    entry("fast", "Fast", "⚡", "rapid rhythm with quick, energetic beats"),
    entry("building", "Building", "📈", "rhythm that accelerates toward a climax"),
    entry("rhythmic", "Rhythmic", "🥁", "beats timed to an underlying musical pulse"),
];

pub(crate) static TRANSITIONS: &[StyleEntry] = &[
    entry("cut", "Cut", "✂", "ends on a clean hard cut into the next shot"),
    entry("crossfade", "Crossfade", "🌗", "dissolves gently into the next shot"),
    entry("fade-black", "Fade to Black", "⬛", "fades out to black before the next shot"),
    entry("match-cut", "Match Cut", "🔗", "ends on a shape or motion that matches the next shot"),
    entry("whip-pan", "Whip Pan", "💨", "ends with a fast whip blur carrying into the next shot"),
    entry("morph", "Morph", "🫧", "morphs fluidly into the opening image of the next shot"),
];

pub(crate) static COLOR_GRADES: &[StyleEntry] = &[
    entry("neutral", "Neutral", "⚪", "neutral, true-to-life color balance"),
    entry("warm", "Warm", "🟠", "warm amber color grade"),
    entry("cool", "Cool", "🔵", "cool blue-steel color grade"),
    entry("teal-orange", "Teal & Orange", "🟧", "teal shadows with orange skin tones"),
    entry("desaturated", "Desaturated", "🩶", "muted, desaturated palette"),
    entry("monochrome", "Black & White", "⚫", "high-contrast black and white monochrome"),
    entry("pastel", "Pastel", "🩷", "soft pastel palette with lifted blacks"),
    entry("vibrant", "Vibrant", "🌈", "punchy, vibrant saturated colors"),
];

pub(crate) static TIME_SETTINGS: &[StyleEntry] = &[
    entry("midday", "Midday", "🌞", "midday with the sun high overhead"),
    entry("dawn", "Dawn", "🌄", "first light of dawn with a pale pink sky"),
    entry("morning", "Morning", "🌤", "fresh morning daylight"),
    entry("afternoon", "Afternoon", "🕒", "late afternoon light"),
    entry("sunset", "Sunset", "🌅", "sunset with a burning orange horizon"),
    entry("dusk", "Dusk", "🌆", "blue-hour dusk just after sundown"),
    entry("night", "Night", "🌙", "night lit by moonlight and street lamps"),
];

pub(crate) static WEATHER_SETTINGS: &[StyleEntry] = &[
    entry("clear", "Clear", "☀", "clear skies"),
    entry("cloudy", "Cloudy", "⛅", "scattered clouds across the sky"),
    entry("rain", "Rain", "🌧", "steady rain with wet reflective surfaces"),
    entry("storm", "Storm", "⛈", "thunderstorm with lightning on the horizon"),
    entry("snow", "Snow", "❄", "falling snow blanketing the ground"),
    entry("fog", "Fog", "🌫", "thick fog swallowing the background"),
    entry("windy", "Windy", "🍂", "strong wind tugging at hair, cloth and leaves"),
];

pub(crate) static OUTPUT_FORMATS: &[StyleEntry] = &[
    entry("landscape", "Landscape 16:9", "🖥", "horizontal widescreen framing"),
    entry("portrait", "Portrait 9:16", "📱", "tall vertical framing for phone screens"),
    entry("square", "Square 1:1", "⬜", "square framing with centered subjects"),
    entry("feed", "Feed 4:5", "🖼", "slightly tall framing for social feeds"),
    entry("cinemascope", "CinemaScope 21:9", "🎞", "ultra-wide anamorphic framing"),
];

pub(crate) static DURATIONS: &[StyleEntry] = &[
    entry("30s", "30 seconds", "⏱", "a thirty-second short"),
    entry("15s", "15 seconds", "⏱", "a fifteen-second teaser"),
    entry("60s", "1 minute", "⏱", "a one-minute short"),
    entry("90s", "90 seconds", "⏱", "a ninety-second short"),
    entry("120s", "2 minutes", "⏱", "a two-minute short film"),
    entry("180s", "3 minutes", "⏱", "a three-minute short film"),
];

pub(crate) static ASPECT_RATIOS: &[(&str, &str)] = &[
    ("landscape", "16:9"),
    ("portrait", "9:16"),
    ("square", "1:1"),
    ("feed", "4:5"),
    ("cinemascope", "21:9"),
];

pub(crate) static DURATION_SECONDS: &[(&str, u32)] = &[
    ("30s", 30),
    ("15s", 15),
    ("60s", 60),
    ("90s", 90),
    ("120s", 120),
    ("180s", 180),
];
