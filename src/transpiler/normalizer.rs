use crate::transpiler::errors::TranspileError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static SCENE_SPECIAL_CHARACTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[\s\-,.;:'"\[\]{}/\\!@#$%^&*]"#).unwrap()
});

static SCENE_EXTRA_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// `Scene_X` and `Scena_X` get their prefix swapped for the rename token.
static SCENE_NAME_MAPPING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(scen[ae])_.*$").unwrap()
});

/// Turns free heading text into a name usable as both a C# class and a file name.
///
/// Whitespace and punctuation become underscores, runs of underscores collapse,
/// and the result is trimmed of underscores. A leading `Scene_`/`Scena_` token
/// (any case) is then replaced with `rename_token`, so `Scene 1` becomes `Story_1`
/// with the default configuration.
pub fn normalize_scene_name(heading: &str, rename_token: &str) -> String {
    rename_scene(&sanitize_scene_name(heading), rename_token)
}

fn sanitize_scene_name(heading: &str) -> String {
    let scene = SCENE_SPECIAL_CHARACTERS.replace_all(heading, "_");
    let scene = SCENE_EXTRA_UNDERSCORES.replace_all(&scene, "_");
    scene.trim_matches('_').to_string()
}

fn rename_scene(scene: &str, rename_token: &str) -> String {
    match SCENE_NAME_MAPPING
        .captures(scene)
        .and_then(|captures| captures.get(1))
    {
        Some(prefix) => format!("{}{}", rename_token, &scene[prefix.end()..]),
        None => scene.to_string(),
    }
}

/// Insertion-only set of scene names, kept in document order.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str) -> Result<(), TranspileError> {
        if !self.seen.insert(name.to_string()) {
            return Err(TranspileError::DuplicateScene {
                name: name.to_string(),
            });
        }

        self.order.push(name.to_string());
        Ok(())
    }

    pub fn into_names(self) -> Vec<String> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_prefix_is_renamed() {
        assert_eq!(normalize_scene_name("Scene_1", "Story"), "Story_1");
        assert_eq!(normalize_scene_name("Scene 1", "Story"), "Story_1");
        assert_eq!(normalize_scene_name("scena 3: the end", "Story"), "Story_3_the_end");
        assert_eq!(normalize_scene_name("SCENE-2", "Chapter"), "Chapter_2");
    }

    #[test]
    fn test_only_the_prefix_token_is_renamed() {
        assert_eq!(normalize_scene_name("Scene 1 Scene 2", "Story"), "Story_1_Scene_2");
        assert_eq!(normalize_scene_name("Scenery", "Story"), "Scenery");
        assert_eq!(normalize_scene_name("Scenes_1", "Story"), "Scenes_1");
        assert_eq!(normalize_scene_name("The Scene 1", "Story"), "The_Scene_1");
    }

    #[test]
    fn test_punctuation_and_whitespace() {
        assert_eq!(normalize_scene_name("Intro Hall!", "Story"), "Intro_Hall");
        assert_eq!(normalize_scene_name("  [Act 1]  {Dawn}  ", "Story"), "Act_1_Dawn");
        assert_eq!(normalize_scene_name("a.b,c;d'e\"f/g\\h", "Story"), "a_b_c_d_e_f_g_h");
        assert_eq!(normalize_scene_name("x@#$%^&*y", "Story"), "x_y");
        assert_eq!(normalize_scene_name("tab\tseparated", "Story"), "tab_separated");
    }

    #[test]
    fn test_existing_underscores_collapse() {
        assert_eq!(normalize_scene_name("__Lobby___Night__", "Story"), "Lobby_Night");
    }

    #[test]
    fn test_rename_leaves_other_names_alone() {
        assert_eq!(rename_scene("Intro_Hall", "Story"), "Intro_Hall");
        assert_eq!(rename_scene("scene_", "Story"), "Story_");
        assert_eq!(sanitize_scene_name("Scene 4"), "Scene_4");
    }

    #[test]
    fn test_all_punctuation_normalizes_to_empty() {
        assert_eq!(normalize_scene_name("!!! ...", "Story"), "");
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut registry = SceneRegistry::new();

        assert!(registry.register("Story_1").is_ok());
        assert!(registry.register("Story_2").is_ok());

        let err = registry.register("Story_1").unwrap_err();
        assert!(matches!(err, TranspileError::DuplicateScene { ref name } if name == "Story_1"));
        assert_eq!(err.to_string(), "Scene Story_1 is already defined");

        assert_eq!(registry.into_names(), vec!["Story_1", "Story_2"]);
    }
}
