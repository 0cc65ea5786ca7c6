//! Character consistency.
//!
//! Selected characters with reference images are assigned contiguous,
//! 1-based reference-image slots in selection order. Image prompts then refer
//! to characters by slot only; re-describing a slotted character in words
//! drifts away from the reference images.

use async_trait::async_trait;
use scenecraft_core::{Character, CharacterRole, CharacterSelection, ImageSourceMode};
use scenecraft_error::{JsonError, ScenecraftResult, StorageError, StorageErrorKind};
use scenecraft_interface::CharacterRegistry;
use std::collections::HashMap;
use std::fmt::Write;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Most uploaded reference images used per character.
pub const MAX_UPLOADED_SLOTS: usize = 4;
/// Most AI-generated images used per character.
pub const MAX_GENERATED_SLOTS: usize = 2;

/// Slots assigned to one character.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct SlotAssignment {
    /// Registry identifier
    character_id: String,
    /// Display name
    name: String,
    /// Narrative role
    role: CharacterRole,
    /// Image-source mode
    mode: ImageSourceMode,
    /// 1-based slot range
    slots: RangeInclusive<usize>,
    /// Images filling the slots, in slot order
    images: Vec<String>,
}

/// Result of [`resolve_character_slots`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterSlots {
    assignments: Vec<SlotAssignment>,
    unslotted: Vec<Character>,
    instruction_block: String,
}

impl CharacterSlots {
    /// Slot range of a character, if it has any slots.
    pub fn slot_range(&self, character_id: &str) -> Option<RangeInclusive<usize>> {
        self.assignments
            .iter()
            .find(|a| a.character_id == character_id)
            .map(|a| a.slots.clone())
    }

    /// Slotted characters in slot order.
    pub fn assignments(&self) -> &[SlotAssignment] {
        &self.assignments
    }

    /// Selected characters that received no slots.
    ///
    /// These have no reference images, so prompts may describe them in words.
    pub fn unslotted(&self) -> &[Character] {
        &self.unslotted
    }

    /// Reference images for generation calls; position `n` fills slot `n + 1`.
    pub fn reference_images(&self) -> Vec<String> {
        self.assignments
            .iter()
            .flat_map(|a| a.images.iter().cloned())
            .collect()
    }

    /// Total slots consumed.
    pub fn total_slots(&self) -> usize {
        self.assignments.iter().map(|a| a.images.len()).sum()
    }

    /// Instruction block appended to every image prompt; empty when no
    /// character has slots.
    pub fn instruction_block(&self) -> &str {
        &self.instruction_block
    }

    /// True when no character has slots.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

fn slot_label(slots: &RangeInclusive<usize>) -> String {
    if slots.start() == slots.end() {
        format!("slot {}", slots.start())
    } else {
        format!("slots {}-{}", slots.start(), slots.end())
    }
}

/// Assign reference-image slots and build the instruction block.
///
/// `characters` is the registry view; `selections` gives the order and
/// image-source mode. Selections naming unknown characters are skipped.
/// A character consumes `min(uploaded, 4) + min(generated, 2)` slots, or
/// none in [`ImageSourceMode::GenerateNew`].
///
/// # Examples
///
/// ```
/// use scenecraft_core::{Character, CharacterRole, CharacterSelection};
/// use scenecraft_pipeline::resolve_character_slots;
///
/// let mara = Character {
///     id: "mara".into(),
///     name: "Mara".into(),
///     role: CharacterRole::Protagonist,
///     appearance: "red coat".into(),
///     clothing: String::new(),
///     personality: String::new(),
///     reference_images: vec!["a.png".into(), "b.png".into()],
///     generated_images: vec![],
/// };
///
/// let slots = resolve_character_slots(&[mara], &[CharacterSelection::new("mara")]);
/// assert_eq!(slots.slot_range("mara"), Some(1..=2));
/// assert!(!slots.instruction_block().contains("red coat"));
/// ```
pub fn resolve_character_slots(
    characters: &[Character],
    selections: &[CharacterSelection],
) -> CharacterSlots {
    let by_id: HashMap<&str, &Character> = characters.iter().map(|c| (c.id.as_str(), c)).collect();
    let mut assignments = Vec::new();
    let mut unslotted = Vec::new();
    let mut next_slot = 1;

    for selection in selections {
        let Some(character) = by_id.get(selection.character_id.as_str()) else {
            warn!(character_id = %selection.character_id, "Selected character not in registry");
            continue;
        };

        let images: Vec<String> = match selection.mode {
            ImageSourceMode::GenerateNew => Vec::new(),
            ImageSourceMode::UseAttached | ImageSourceMode::AiReference => character
                .reference_images
                .iter()
                .take(MAX_UPLOADED_SLOTS)
                .chain(character.generated_images.iter().take(MAX_GENERATED_SLOTS))
                .cloned()
                .collect(),
        };

        if images.is_empty() {
            debug!(character_id = %character.id, mode = %selection.mode, "Character has no slots");
            unslotted.push((*character).clone());
            continue;
        }

        let slots = next_slot..=next_slot + images.len() - 1;
        next_slot += images.len();
        debug!(character_id = %character.id, slots = %slot_label(&slots), "Assigned slots");
        assignments.push(SlotAssignment {
            character_id: character.id.clone(),
            name: character.name.clone(),
            role: character.role,
            mode: selection.mode,
            slots,
            images,
        });
    }

    let instruction_block = instruction_block(&assignments);
    CharacterSlots {
        assignments,
        unslotted,
        instruction_block,
    }
}

fn instruction_block(assignments: &[SlotAssignment]) -> String {
    if assignments.is_empty() {
        return String::new();
    }

    let mut block = String::from("CHARACTER REFERENCES\n");
    block.push_str(
        "Reference images are attached in numbered slots. Depict each character exactly as \
         shown in their slots. Never describe a character's face, hair, body, clothing or \
         other appearance in words; refer to characters only by name and slot numbers.\n",
    );
    for assignment in assignments {
        let _ = write!(
            block,
            "- {} ({}): {}",
            assignment.name,
            assignment.role,
            slot_label(&assignment.slots)
        );
        if assignment.mode == ImageSourceMode::AiReference {
            block.push_str(", loose reference: keep the identity, pose freely");
        }
        block.push('\n');
    }

    if let Some(anchor) = assignments
        .iter()
        .find(|a| a.role == CharacterRole::Protagonist)
    {
        let _ = writeln!(
            block,
            "Consistency anchor: {} ({}) is the protagonist and must look identical in every scene.",
            anchor.name,
            slot_label(&anchor.slots)
        );
    }
    block
}

/// Character registry held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCharacterRegistry {
    characters: Vec<Character>,
}

impl InMemoryCharacterRegistry {
    /// Registry over the given characters.
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    /// Registry loaded from a JSON array of characters.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read, or a JSON error if
    /// it does not parse.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn from_json_file(path: impl AsRef<Path>) -> ScenecraftResult<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e)))
        })?;
        let characters: Vec<Character> = serde_json::from_str(&contents)
            .map_err(|e| JsonError::new(format!("Failed to parse characters: {}", e)))?;
        debug!(count = characters.len(), "Loaded characters");
        Ok(Self::new(characters))
    }
}

#[async_trait]
impl CharacterRegistry for InMemoryCharacterRegistry {
    async fn list(&self) -> ScenecraftResult<Vec<Character>> {
        Ok(self.characters.clone())
    }

    async fn get(&self, id: &str) -> ScenecraftResult<Option<Character>> {
        Ok(self.characters.iter().find(|c| c.id == id).cloned())
    }
}
