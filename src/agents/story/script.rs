//! The fixed movie script and narration rules.

use serde::Serialize;

/// Every narrated scene ends with this, exactly once.
pub const CLOSING_PHRASE: &str = "What do you do next?";

pub const TITLE: &str = "The Last Train to Vireo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scene {
    pub title: &'static str,
    pub narration: &'static str,
}

pub const SCENES: &[Scene] = &[
    Scene {
        title: "Platform Nine",
        narration: "Rain hammers the glass roof of Halden Station. The last train to Vireo hisses at \
                    platform nine, and a conductor with a brass lantern checks his watch for the third time. \
                    In your coat pocket is a ticket you do not remember buying.",
    },
    Scene {
        title: "The Dining Car",
        narration: "The train lurches into the dark. In the dining car a woman in a green scarf slides a \
                    folded note across your table without looking up. It reads: they know you have the key. \
                    What do you do next?",
    },
    Scene {
        title: "The Tunnel",
        narration: "Every lamp in the carriage dies as the train enters the mountain tunnel. Footsteps \
                    come down the aisle, slow and deliberate, and stop beside your seat.",
    },
    Scene {
        title: "The Luggage Van",
        narration: "Behind a stack of mail sacks you find a steamer trunk stamped with your own initials. \
                    Its lock is shaped exactly like the key that has been sitting in your pocket all night.",
    },
    Scene {
        title: "Vireo",
        narration: "Dawn breaks as the train rolls into Vireo. On the platform the woman in the green scarf \
                    is waiting, and beside her stands the conductor, lantern still lit in the morning sun.",
    },
];

pub const EPILOGUE: &str = "The doors slide open and the story of the last train to Vireo comes to an end. \
                            Thanks for riding along.";

/// Finish a piece of narration with the closing phrase, exactly once.
///
/// Occurrences already in the text are stripped until none remain, including
/// ones that only form once an inner copy is cut out.
pub fn narrate(text: &str) -> String {
    let mut body = collapse_whitespace(text);
    loop {
        let stripped = collapse_whitespace(&body.replace(CLOSING_PHRASE, ""));
        if stripped == body {
            break;
        }
        body = stripped;
    }

    if body.is_empty() {
        CLOSING_PHRASE.to_string()
    } else {
        format!("{} {}", body, CLOSING_PHRASE)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Narration for a scene, optionally acknowledging what the player just did.
pub fn narrate_scene(scene: &Scene, player_action: Option<&str>) -> String {
    match player_action.map(str::trim).filter(|a| !a.is_empty()) {
        Some(action) => narrate(&format!("You decide to {}. {}", action.trim_end_matches('.'), scene.narration)),
        None => narrate(scene.narration),
    }
}
