//! Zentrale Konfiguration für das Cap-Tool.
//!
//! `CapOptions` enthält alle zur Laufzeit änderbaren Operator-Parameter.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Segmente ────────────────────────────────────────────────────────

/// Standard-Segmentanzahl beim Aufruf des Tools.
pub const SEGMENTS_DEFAULT: u32 = 5;
/// Untergrenze beim interaktiven Entfernen und bei Zahleneingabe.
pub const SEGMENTS_MIN: u32 = 1;
/// Obergrenze, begrenzt die Kosten pro Move-Event.
pub const SEGMENTS_MAX: u32 = 250;

// ── Falloff ─────────────────────────────────────────────────────────

/// Standard-Basis der Exponential-Falloff-Kurve.
pub const SCALE_FAC_DEFAULT: f32 = 0.15;
/// Schrittweite für die interaktive Anpassung der Falloff-Basis.
pub const SCALE_FAC_STEP: f32 = 0.05;
/// Untergrenze der Falloff-Basis.
pub const SCALE_FAC_MIN: f32 = 0.01;
/// Obergrenze der Falloff-Basis.
pub const SCALE_FAC_MAX: f32 = 100.0;
/// Band um 1.0, in dem die geschlossene Form 0/0 degeneriert und die
/// Implementierung auf den analytischen Grenzwert wechselt.
pub const SCALE_FAC_UNITY_EPS: f32 = 1e-3;
/// Standard-Offset `k` im Nenner `(n + k)` der Falloff-Kurve.
/// Über die beobachteten Tool-Revisionen schwankte der Wert zwischen 1
/// und 2 — hier ein einstellbarer Easing-Parameter.
pub const FALLOFF_BIAS_DEFAULT: f32 = 1.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Cap-Tool-Parameter.
/// Wird als `polycap_editor.toml` neben der Binary gespeichert und
/// überlebt so wiederholte Tool-Aufrufe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapOptions {
    /// Anzahl der eingeschnittenen Segment-Loops
    pub segment_count: u32,
    /// Basis der Exponential-Falloff-Kurve (ungleich 1)
    pub scale_fac: f32,
    /// Verschiebung entlang der negativen statt positiven Normalen
    pub invert: bool,
    /// Control-Length-Modus: aktuelle Lage als neue Basis übernehmen
    pub control_length: bool,
    /// Kehrt den Loop-Skalierungsfaktor um (invertiert die Wölbung)
    #[serde(default)]
    pub flip_scale: bool,
    /// Offset `k` im Falloff-Nenner `(n + k)`
    #[serde(default = "default_falloff_bias")]
    pub falloff_bias: f32,
}

/// Serde-Default für `falloff_bias` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_falloff_bias() -> f32 {
    FALLOFF_BIAS_DEFAULT
}

impl Default for CapOptions {
    fn default() -> Self {
        Self {
            segment_count: SEGMENTS_DEFAULT,
            scale_fac: SCALE_FAC_DEFAULT,
            invert: false,
            control_length: false,
            flip_scale: false,
            falloff_bias: FALLOFF_BIAS_DEFAULT,
        }
    }
}

impl CapOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(opts) => {
                    log::info!("Cap-Optionen geladen aus: {}", path.display());
                    opts.clamped()
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Cap-Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("polycap_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("polycap_editor.toml")
    }

    /// Gibt eine Kopie mit allen Werten in gültigen Grenzen zurück.
    pub fn clamped(mut self) -> Self {
        self.segment_count = self.segment_count.clamp(SEGMENTS_MIN, SEGMENTS_MAX);
        self.scale_fac = clamp_scale_fac(self.scale_fac);
        if !self.falloff_bias.is_finite() || self.falloff_bias <= 0.0 {
            self.falloff_bias = FALLOFF_BIAS_DEFAULT;
        }
        self
    }

    /// Verschiebt die Falloff-Basis um `delta` und hält sie in den Grenzen.
    pub fn step_scale_fac(&mut self, delta: f32) {
        self.scale_fac = clamp_scale_fac(self.scale_fac + delta);
    }
}

/// Hält die Falloff-Basis in (0, ∞) innerhalb der konfigurierten Grenzen.
///
/// Der Wert 1.0 selbst bleibt erlaubt — die Falloff-Auswertung wechselt
/// dort auf den analytischen Grenzwert.
fn clamp_scale_fac(value: f32) -> f32 {
    if !value.is_finite() {
        return SCALE_FAC_DEFAULT;
    }
    value.clamp(SCALE_FAC_MIN, SCALE_FAC_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_operator_defaults() {
        let opts = CapOptions::default();
        assert_eq!(opts.segment_count, 5);
        assert_eq!(opts.scale_fac, 0.15);
        assert!(!opts.invert);
        assert!(!opts.control_length);
        assert!(!opts.flip_scale);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut opts = CapOptions::default();
        opts.segment_count = 12;
        opts.scale_fac = 0.4;
        opts.invert = true;

        let text = toml::to_string_pretty(&opts).unwrap();
        let parsed: CapOptions = toml::from_str(&text).unwrap();
        assert_eq!(parsed, opts);
    }

    #[test]
    fn test_missing_new_fields_fall_back() {
        // Ältere Dateien kennen flip_scale/falloff_bias noch nicht
        let text = "segment_count = 7\nscale_fac = 0.2\ninvert = false\ncontrol_length = true\n";
        let parsed: CapOptions = toml::from_str(text).unwrap();
        assert_eq!(parsed.segment_count, 7);
        assert!(!parsed.flip_scale);
        assert_eq!(parsed.falloff_bias, FALLOFF_BIAS_DEFAULT);
    }

    #[test]
    fn test_clamped_bounds() {
        let opts = CapOptions {
            segment_count: 9999,
            scale_fac: -3.0,
            falloff_bias: -1.0,
            ..CapOptions::default()
        }
        .clamped();

        assert_eq!(opts.segment_count, SEGMENTS_MAX);
        assert_eq!(opts.scale_fac, SCALE_FAC_MIN);
        assert_eq!(opts.falloff_bias, FALLOFF_BIAS_DEFAULT);
    }

    #[test]
    fn test_step_scale_fac_clamps() {
        let mut opts = CapOptions::default();
        opts.step_scale_fac(-10.0);
        assert_eq!(opts.scale_fac, SCALE_FAC_MIN);
        opts.step_scale_fac(1000.0);
        assert_eq!(opts.scale_fac, SCALE_FAC_MAX);
    }
}
