use crate::transpiler::classifier::Dialogue;
use crate::transpiler::errors::TranspileError;
use tera::{Context, Tera};

const SCENE_PROLOGUE: &str = "scene_prologue";
const TRANSITION_HELPER: &str = "transition_helper";
const DIALOG_HELPER: &str = "dialog_helper";

const SCENE_PROLOGUE_TEMPLATE: &str = r#"using UnityEngine;

public class {{ scene }} : MonoBehaviour {
    void Awake() {
        Tale.Wait();
        Transition.FadeIn();
"#;

const SCENE_EPILOGUE: &str = r#"
        Tale.Wait();
        Transition.FadeOut();
        Tale.Scene();
    }
}
"#;

const TRANSITION_HELPER_TEMPLATE: &str = r#"using UnityEngine;

public static class Transition {
    public static TaleUtil.Action FadeIn(float duration = 1f) =>
        Tale.Transition("fade", Tale.TransitionType.IN, duration);

    public static TaleUtil.Action FadeOut(float duration = 1f) =>
        Tale.Transition("fade", Tale.TransitionType.OUT, duration);
}
"#;

const DIALOG_HELPER_TEMPLATE: &str = r#"using System.IO;
using UnityEngine;

public static class Dialog {
{%- for character in characters %}
    public static TaleUtil.Action {{ character }}(string what, string voice = null, bool additive = false, bool reverb = false) =>
        Tale.Dialog("{{ character }}", what, null, voice != null ? Path.Combine("{{ character }}", voice) : null, voice != null && voice.ToLower().EndsWith("loop"), additive, reverb);
{% endfor -%}
}
"#;

/// Renders the C# emitted for scenes and the two helper classes.
///
/// Statement-level emitters append to the buffer of the scene being written;
/// the whole-file templates are rendered through Tera.
pub struct SceneCodeGenerator {
    tera: Tera,
}

impl SceneCodeGenerator {
    pub fn new() -> Result<Self, TranspileError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            (SCENE_PROLOGUE, SCENE_PROLOGUE_TEMPLATE),
            (TRANSITION_HELPER, TRANSITION_HELPER_TEMPLATE),
            (DIALOG_HELPER, DIALOG_HELPER_TEMPLATE),
        ])
        .map_err(|source| TranspileError::Template {
            template: "built-in".to_string(),
            source,
        })?;

        Ok(Self { tera })
    }

    pub fn scene_prologue(&self, out: &mut String, scene: &str) -> Result<(), TranspileError> {
        let mut context = Context::new();
        context.insert("scene", scene);

        out.push_str(&self.render(SCENE_PROLOGUE, &context)?);
        Ok(())
    }

    pub fn scene_epilogue(&self, out: &mut String) {
        out.push_str(SCENE_EPILOGUE);
    }

    pub fn dialogue(&self, out: &mut String, line: &Dialogue) {
        out.push_str(&format!(
            "\n        Dialog.{}(\"{}\"",
            line.speaker, line.utterance
        ));

        if line.is_reverb() {
            out.push_str(", reverb: true");
        }

        out.push_str(");\n");
    }

    pub fn pause(&self, out: &mut String) {
        out.push_str("\n        Tale.Wait();\n");
    }

    pub fn comment(&self, out: &mut String, text: &str) {
        out.push_str(&format!("\n        // {}\n", text));
    }

    pub fn transition_helper(&self) -> Result<String, TranspileError> {
        self.render(TRANSITION_HELPER, &Context::new())
    }

    /// One dispatch method per speaker, in the order given.
    pub fn dialog_helper(&self, characters: &[String]) -> Result<String, TranspileError> {
        let mut context = Context::new();
        context.insert("characters", characters);

        self.render(DIALOG_HELPER, &context)
    }

    fn render(&self, template: &str, context: &Context) -> Result<String, TranspileError> {
        self.tera
            .render(template, context)
            .map_err(|source| TranspileError::Template {
                template: template.to_string(),
                source,
            })
    }
}
