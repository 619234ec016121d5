pub fn help_lines() -> Vec<String> {
    let lines = [
        "COMBO-FX HELP",
        "=============",
        "",
        "POOLS:",
        "  j, ↓ / k, ↑ - Move down / up",
        "  gg, Home / G, End - First / last entry",
        "  h, ← / l, → - Focus Enabled / Disabled",
        "  Tab - Focus the other pool",
        "  Space, m - Move entry to the other pool (and select it)",
        "  < / > - Enable all / disable all",
        "  K / J - Move enabled entry up / down (export order)",
        "  Enter - Select entry and edit it",
        "  x - Clear selection",
        "  A, Ctrl+a - Set for all enabled entries",
        "  / - Filter entries by pattern (Esc clears)",
        "",
        "FORM (i, e):",
        "  ↑ / ↓, Tab - Previous / next field",
        "  ← / → - Previous / next type, or -1 / +1",
        "  0-9, - - Type a number",
        "  Ctrl+x - Clear selection",
        "  Ctrl+a - Set for all enabled entries",
        "  Esc - Back to the pools",
        "",
        "COMMANDS:",
        "  :w [file] - Export enabled entries",
        "  :wq [file] - Export and quit",
        "  :e <file> - Import, replacing everything",
        "  :yank - Copy the export to the clipboard",
        "  :enable <name|*> / :disable <name|*>",
        "  :select <name> / :clear",
        "  :set <field> <value> - vfx, sfx, combo, cooldown, ok, good, great, excellent",
        "  :setall - Set for all enabled entries",
        "  :mkrc [file] - Write a sample .combofxrc",
        "  :q - Quit",
        "",
        "Press any key to close this help",
    ];
    lines.iter().map(|s| s.to_string()).collect()
}
