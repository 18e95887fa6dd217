//! Rohe Modal-Events, wie der Host sie pro Eingabe liefert.

use glam::Vec2;

/// Taste innerhalb der Modal-Session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey {
    /// Ziffer 0–9 (Zahleneingabe für die Segmentanzahl)
    Digit(u8),
    /// Eingabe bestätigen (committet die Zahleneingabe)
    Enter,
    /// Letzte Ziffer der Zahleneingabe löschen
    Backspace,
    /// Segment hinzufügen (wie Scroll hoch)
    Plus,
    /// Segment entfernen (wie Scroll runter)
    Minus,
    /// Falloff-Basis erhöhen
    ArrowUp,
    /// Falloff-Basis verringern
    ArrowDown,
    /// Verschiebungsrichtung invertieren
    KeyI,
    /// Loop-Skalierung spiegeln (Wölbung invertieren)
    KeyF,
    /// Control-Length-Modus umschalten
    KeyV,
    /// Parameter auf Standardwerte zurücksetzen
    KeyR,
}

/// Diskretes Event der Modal-Session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModalEvent {
    /// Pointer bewegt (Region-Pixelkoordinaten)
    PointerMoved { region_px: Vec2 },
    /// Mausrad hoch — Segment hinzufügen
    WheelUp,
    /// Mausrad runter — Segment entfernen
    WheelDown,
    /// Tastendruck
    KeyPressed { key: ModalKey },
    /// Linksklick — Session bestätigen
    LeftMouse,
    /// Rechtsklick — Session abbrechen
    RightMouse,
    /// Escape — Session abbrechen
    Escape,
}
