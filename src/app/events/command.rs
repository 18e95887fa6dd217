//! Commands sind mutierende Schritte, die zentral ausgeführt werden.

use glam::Vec2;

/// Mutierender Schritt der Cap-Session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapCommand {
    /// Falloff-Transform mit neuer Pointer-Position ausführen
    UpdatePreview { region_px: Vec2 },
    /// Einen Segment-Loop randseitig einfügen
    AddSegment,
    /// Den innersten Segment-Loop entfernen
    RemoveSegment,
    /// Falloff-Basis um `delta` verschieben
    StepScaleFac { delta: f32 },
    /// Verschiebungsrichtung invertieren
    ToggleInvert,
    /// Loop-Skalierung spiegeln
    ToggleFlipScale,
    /// Control-Length-Modus umschalten (Basis neu setzen)
    ToggleControlLength,
    /// Parameter auf die persistierten Standardwerte zurücksetzen
    ResetParams,
    /// Ziffer an die Zahleneingabe anhängen
    PushNumericDigit { digit: u8 },
    /// Letzte Ziffer der Zahleneingabe entfernen
    PopNumericDigit,
    /// Zahleneingabe als neue Segmentanzahl übernehmen
    CommitNumericEntry,
    /// Session bestätigen: Ursprungsflächen löschen
    Confirm,
    /// Session abbrechen: neue Geometrie verwerfen
    Cancel,
}
