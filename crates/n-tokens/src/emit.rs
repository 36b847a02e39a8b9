//! Stylesheet emitter: a built [`Brand`] to CSS text.
//!
//! Output is three blocks separated by one blank line:
//!
//! ```text
//! :root { ... }          light values
//! .dark { ... }          dark values, same declarations
//! @theme inline { ... }  re-export under --color-* / --font-* / --radius-*
//! ```
//!
//! Inside each root block, foundation variables come first and aliases
//! after them: token bases, the fallback sentinel, token steps, the
//! resolved map, step aliases, then font stacks. The function is pure, so
//! the same brand always renders to the same bytes.

use crate::brand::Brand;
use crate::guide::{EntryKind, GUIDE_GROUPS};
use crate::resolve::{FALLBACK_COLOR, FALLBACK_VARIABLE};
use crate::role::Role;
use crate::token::{ColorToken, Step, Variant};

/// Radius sub-scale derived from `--radius`.
const RADIUS_SCALE: [(&str, &str); 4] = [
    ("sm", "calc(var(--radius) - 4px)"),
    ("md", "calc(var(--radius) - 2px)"),
    ("lg", "var(--radius)"),
    ("xl", "calc(var(--radius) + 4px)"),
];

// ---------------------------------------------------------------------------
// Sheet writer
// ---------------------------------------------------------------------------

/// Accumulates blocks of `--name: value;` declarations.
#[derive(Default)]
struct Sheet {
    out: String,
}

impl Sheet {
    fn open(&mut self, selector: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(selector);
        self.out.push_str(" {\n");
    }

    fn decl(&mut self, name: &str, value: &str) {
        self.out.push_str("  --");
        self.out.push_str(name);
        self.out.push_str(": ");
        self.out.push_str(value);
        self.out.push_str(";\n");
    }

    /// `--<name>: var(--<target>);`
    fn alias(&mut self, name: &str, target: &str) {
        self.decl(name, &format!("var(--{target})"));
    }

    fn close(&mut self) {
        self.out.push_str("}\n");
    }
}

// ---------------------------------------------------------------------------
// Step aliases
// ---------------------------------------------------------------------------

/// Style-guide groups whose base value is a token with steps, paired with
/// that token.
fn step_alias_sources(brand: &Brand) -> Vec<(Role, &ColorToken)> {
    GUIDE_GROUPS
        .iter()
        .filter_map(|&group| {
            let token = brand.light.get(group.name())?.base_token(&brand.tokens)?;
            token.has_steps().then_some((group, token))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

fn root_block(sheet: &mut Sheet, brand: &Brand, variant: Variant, aliases: &[(Role, &ColorToken)]) {
    sheet.open(variant.selector());

    for token in &brand.tokens {
        sheet.decl(&token.variable_name, &token.value(variant).to_css());
    }

    if brand.has_fallback() {
        sheet.decl(FALLBACK_VARIABLE, &FALLBACK_COLOR.to_css());
    }

    for token in &brand.tokens {
        for (step, expression) in token.steps(variant) {
            sheet.decl(&token.step_variable(*step), expression);
        }
    }

    for entry in brand.variables(variant) {
        sheet.decl(&entry.name, &entry.value.to_css());
    }

    for (group, token) in aliases {
        for step in Step::ALL {
            sheet.alias(&format!("{group}-{step}"), &token.step_variable(step));
        }
    }

    for font in &brand.fonts {
        sheet.decl(&format!("font-family-{}", font.role), &font.stack());
    }

    sheet.close();
}

fn theme_block(sheet: &mut Sheet, brand: &Brand, aliases: &[(Role, &ColorToken)]) {
    sheet.open("@theme inline");

    for token in &brand.tokens {
        sheet.alias(&format!("color-{}", token.variable_name), &token.variable_name);
        for step in token.light_steps.keys() {
            let variable = token.step_variable(*step);
            sheet.alias(&format!("color-{variable}"), &variable);
        }
    }

    for entry in brand.light.iter().filter(|e| e.kind == EntryKind::Color) {
        sheet.alias(&format!("color-{}", entry.name), &entry.name);
    }

    for (group, _) in aliases {
        for step in Step::ALL {
            let variable = format!("{group}-{step}");
            sheet.alias(&format!("color-{variable}"), &variable);
        }
    }

    for font in &brand.fonts {
        sheet.alias(&format!("font-{}", font.role), &format!("font-family-{}", font.role));
    }

    if brand.light.contains("radius") {
        for (size, value) in RADIUS_SCALE {
            sheet.decl(&format!("radius-{size}"), value);
        }
    }

    sheet.close();
}

/// Render the full stylesheet for a brand.
#[must_use]
pub fn render_stylesheet(brand: &Brand) -> String {
    let aliases = step_alias_sources(brand);
    let mut sheet = Sheet::default();
    for variant in Variant::BOTH {
        root_block(&mut sheet, brand, variant, &aliases);
    }
    theme_block(&mut sheet, brand, &aliases);
    sheet.out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::{BrandDefinition, BrandInfo};
    use crate::diagnostics::Ignore;
    use crate::font::{FontDefinition, FontRole};
    use crate::guide::{AuxValues, NamedValue, StyleGuide};
    use crate::token::ColorDefinition;
    use crate::value::StyleValue;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn block<'a>(css: &'a str, selector: &str) -> &'a str {
        let start = css.find(&format!("{selector} {{\n")).unwrap_or_else(|| panic!("no {selector} block"));
        let rest = &css[start..];
        &rest[..=rest.find("\n}\n").unwrap() + 2]
    }

    fn tiny() -> Brand {
        Brand::build(
            &BrandDefinition {
                info: BrandInfo { name: "Tiny".into(), ..BrandInfo::default() },
                colors: vec![
                    ColorDefinition::new("Paper", "oklch(1 0 0)", "oklch(0.145 0 0)").roles(&["background", "card"]),
                    ColorDefinition::new("Ink", "oklch(0.145 0 0)", "oklch(0.985 0 0)").roles(&["foreground"]),
                    ColorDefinition::new("Ocean", "oklch(0.55 0.15 240)", "oklch(0.7 0.12 240)")
                        .color()
                        .on_color("oklch(0.985 0 0)", "oklch(0.145 0 0)"),
                ],
                fonts: vec![FontDefinition::new("Inter", FontRole::Sans)],
                style_guide: StyleGuide {
                    primary: Some(StyleValue::reference("Ocean")),
                    secondary: Some(StyleValue::reference("Paper")),
                    accent: Some(StyleValue::reference("Ocean")),
                    destructive: Some(StyleValue::literal("oklch(0.577 0.245 27.325)")),
                    muted: Some(StyleValue::reference("Paper")),
                    radius: Some("0.625rem".into()),
                    ..StyleGuide::default()
                },
                aux: AuxValues {
                    shadows: vec![NamedValue::new("shadow-sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)")],
                    ..AuxValues::default()
                },
            },
            &mut Ignore,
        )
    }

    #[test]
    fn exact_light_block() {
        let css = render_stylesheet(&tiny());
        let expected = "\
:root {
  --paper: oklch(1 0 0);
  --ink: oklch(0.145 0 0);
  --ocean: oklch(0.55 0.15 240);
  --ocean-bright: color-mix(in oklch, var(--ocean) 92%, white 8%);
  --ocean-brighter: color-mix(in oklch, var(--ocean) 85%, white 15%);
  --ocean-dark: color-mix(in oklch, var(--ocean) 92%, black 8%);
  --ocean-darker: color-mix(in oklch, var(--ocean) 85%, black 15%);
  --background: var(--paper);
  --foreground: var(--ink);
  --card: var(--paper);
  --card-foreground: oklch(0.145 0 0);
  --popover: var(--paper);
  --popover-foreground: var(--ink);
  --primary: var(--ocean);
  --primary-foreground: oklch(0.985 0 0);
  --secondary: var(--paper);
  --secondary-foreground: oklch(0.145 0 0);
  --muted: var(--paper);
  --muted-foreground: oklch(0.145 0 0);
  --accent: var(--ocean);
  --accent-foreground: oklch(0.985 0 0);
  --destructive: oklch(0.577 0.245 27.325);
  --destructive-foreground: oklch(0.985 0 0);
  --border: var(--paper);
  --input: var(--paper);
  --ring: var(--ocean);
  --chart-1: var(--ocean);
  --chart-2: var(--paper);
  --chart-3: var(--ocean);
  --chart-4: oklch(0.577 0.245 27.325);
  --chart-5: var(--paper);
  --sidebar: var(--paper);
  --sidebar-foreground: oklch(0.145 0 0);
  --sidebar-primary: var(--ocean);
  --sidebar-primary-foreground: oklch(0.985 0 0);
  --sidebar-accent: var(--ocean);
  --sidebar-accent-foreground: oklch(0.985 0 0);
  --sidebar-border: var(--paper);
  --sidebar-ring: var(--ocean);
  --radius: 0.625rem;
  --shadow-sm: 0 1px 2px 0 rgb(0 0 0 / 0.05);
  --primary-bright: var(--ocean-bright);
  --primary-brighter: var(--ocean-brighter);
  --primary-dark: var(--ocean-dark);
  --primary-darker: var(--ocean-darker);
  --accent-bright: var(--ocean-bright);
  --accent-brighter: var(--ocean-brighter);
  --accent-dark: var(--ocean-dark);
  --accent-darker: var(--ocean-darker);
  --ring-bright: var(--ocean-bright);
  --ring-brighter: var(--ocean-brighter);
  --ring-dark: var(--ocean-dark);
  --ring-darker: var(--ocean-darker);
  --font-family-sans: Inter, ui-sans-serif, system-ui, sans-serif;
}
";
        assert_eq!(block(&css, ":root"), expected);
    }

    #[test]
    fn dark_block_uses_dark_values() {
        let css = render_stylesheet(&tiny());
        let dark = block(&css, ".dark");
        assert!(dark.contains("  --ocean: oklch(0.7 0.12 240);\n"));
        assert!(dark.contains("  --primary: var(--ocean);\n"));
        assert!(dark.contains("  --primary-foreground: oklch(0.145 0 0);\n"));
        assert!(dark.contains("  --primary-bright: var(--ocean-bright);\n"));
    }

    #[test]
    fn theme_block_re_exports() {
        let css = render_stylesheet(&tiny());
        let theme = block(&css, "@theme inline");
        assert!(theme.contains("  --color-ocean: var(--ocean);\n"));
        assert!(theme.contains("  --color-ocean-darker: var(--ocean-darker);\n"));
        assert!(theme.contains("  --color-primary: var(--primary);\n"));
        assert!(theme.contains("  --color-primary-bright: var(--primary-bright);\n"));
        assert!(theme.contains("  --color-sidebar-ring: var(--sidebar-ring);\n"));
        assert!(theme.contains("  --font-sans: var(--font-family-sans);\n"));
        assert!(theme.ends_with(
            "  --radius-sm: calc(var(--radius) - 4px);\n\
             \x20 --radius-md: calc(var(--radius) - 2px);\n\
             \x20 --radius-lg: var(--radius);\n\
             \x20 --radius-xl: calc(var(--radius) + 4px);\n}\n"
        ));
        // Literals are consumed directly, not re-exported.
        assert!(!theme.contains("--color-radius"));
        assert!(!theme.contains("--color-shadow-sm"));
    }

    #[test]
    fn layout() {
        let css = render_stylesheet(&tiny());
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("}\n\n.dark {\n"));
        assert!(css.contains("}\n\n@theme inline {\n"));
        assert!(css.ends_with("}\n"));
        assert!(!css.contains("\n\n\n"));
    }

    #[test]
    fn fallback_sentinel_only_when_needed() {
        let css = render_stylesheet(&tiny());
        assert!(!css.contains("broken-reference"));

        let brand = Brand::build(
            &BrandDefinition {
                style_guide: StyleGuide {
                    primary: Some(StyleValue::reference("Missing")),
                    ..StyleGuide::default()
                },
                ..BrandDefinition::default()
            },
            &mut Ignore,
        );
        let css = render_stylesheet(&brand);
        for selector in [":root", ".dark"] {
            let root = block(&css, selector);
            assert!(root.contains("  --broken-reference: oklch(0.65 0.3 328);\n"));
            assert!(root.contains("  --primary: var(--broken-reference);\n"));
        }
    }

    #[test]
    fn shade_groups_get_no_step_aliases() {
        let css = render_stylesheet(&tiny());
        assert!(!css.contains("--secondary-bright"));
        assert!(!css.contains("--paper-bright"));
    }

    #[test]
    fn no_radius_no_scale() {
        let brand = Brand::build(&BrandDefinition::default(), &mut Ignore);
        assert!(!render_stylesheet(&brand).contains("--radius-sm"));
    }

    #[test]
    fn one_base_declaration_per_token() {
        let brand = tiny();
        let css = render_stylesheet(&brand);
        for selector in [":root", ".dark"] {
            let root = block(&css, selector);
            for token in &brand.tokens {
                let prefix = format!("  --{}: ", token.variable_name);
                assert_eq!(root.matches(&prefix).count(), 1, "{selector} {}", token.name);
            }
        }
    }

    proptest! {
        #[test]
        fn rendering_is_idempotent(
            names in proptest::collection::vec("[A-Z][a-z]{2,7}", 1..6),
            primary in 0usize..6,
        ) {
            let colors: Vec<_> = names
                .iter()
                .enumerate()
                .map(|(i, n)| {
                    let def = ColorDefinition::new(n, "#336699", "#99ccff").roles(&["chart-1"]);
                    if i % 2 == 0 { def.color() } else { def }
                })
                .collect();
            let reference = names.get(primary).cloned().unwrap_or_else(|| "Nowhere".into());
            let brand = Brand::build(
                &BrandDefinition {
                    colors,
                    style_guide: StyleGuide {
                        primary: Some(StyleValue::reference(&reference)),
                        ..StyleGuide::default()
                    },
                    ..BrandDefinition::default()
                },
                &mut Ignore,
            );
            let first = render_stylesheet(&brand);
            let second = render_stylesheet(&brand);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(render_stylesheet(&brand.clone()), first);
        }
    }
}
