//! Renders the two files the generator produces: `phash.h` (constants
//! and externs) and `phash.c` (tables plus the `phash()` function
//! body). Line-wrapping and element-width rules follow the original
//! generator's `make_h`/`make_c` exactly, so output compiled by an old
//! Makefile still looks familiar.

use crate::key::{HashKind, Mode};
use crate::mixer::GOLDEN_RATIO;
use crate::params::{Sizing, USE_SCRAMBLE};
use crate::solver::Solution;

const UB1MAXVAL: u32 = 0xff;
const UB2MAXVAL: u32 = 0xffff;

fn tab_element_width(sizing: Sizing) -> &'static str {
    if sizing.smax <= UB1MAXVAL + 1 || sizing.blen >= USE_SCRAMBLE {
        "ub1"
    } else {
        "ub2"
    }
}

/// Render `phash.h`: table externs (if `blen > 0`), the sizing
/// `#define`s, and the `phash()` prototype matching `mode`.
pub fn render_header(mode: Mode, sizing: Sizing, nkeys: u32, salt: u32) -> String {
    let mut out = String::new();
    out.push_str("/* Perfect hash definitions */\n");
    out.push_str("#ifndef STANDARD\n#include \"standard.h\"\n#endif /* STANDARD */\n");
    out.push_str("#ifndef PHASH\n#define PHASH\n\n");

    if sizing.blen > 0 {
        out.push_str(&format!("extern {} tab[];\n", tab_element_width(sizing)));
        if sizing.blen >= USE_SCRAMBLE {
            let scramble_width = if sizing.smax <= UB2MAXVAL + 1 { "ub2" } else { "ub4" };
            out.push_str(&format!("extern {scramble_width} scramble[];\n"));
        }
        out.push_str(&format!(
            "#define PHASHLEN 0x{:x}  /* length of hash mapping table */\n",
            sizing.blen
        ));
    }
    out.push_str(&format!(
        "#define PHASHNKEYS {nkeys}  /* How many keys were hashed */\n"
    ));
    out.push_str(&format!(
        "#define PHASHRANGE {}  /* Range any input might map to */\n",
        sizing.smax
    ));
    out.push_str(&format!(
        "#define PHASHSALT 0x{:08x} /* internal, initializes the mixing hash */\n",
        salt.wrapping_mul(GOLDEN_RATIO)
    ));
    out.push('\n');
    out.push_str(&prototype(mode));
    out.push_str("\n\n#endif  /* PHASH */\n");
    out
}

fn prototype(mode: Mode) -> String {
    match mode.hash_kind() {
        HashKind::Str => "ub4 phash(char *key, int len);\n".to_string(),
        HashKind::InlineStr | HashKind::Int => "ub4 phash(ub4 val);\n".to_string(),
        HashKind::Ab => "ub4 phash(ub4 a, ub4 b);\n".to_string(),
    }
}

/// Render `phash.c`: the `scramble[]` table (if `blen >= USE_SCRAMBLE`),
/// `tab[]`, and the `phash()` function body.
pub fn render_source(
    mode: Mode,
    sizing: Sizing,
    solution: &Solution,
    scramble_table: &[u32; 256],
    salt: u32,
) -> String {
    let mut out = String::new();
    out.push_str("/* table for the mapping for the perfect hash */\n");
    out.push_str("#ifndef STANDARD\n#include \"standard.h\"\n#endif /* STANDARD */\n");
    out.push_str("#ifndef PHASH\n#include \"phash.h\"\n#endif /* PHASH */\n");
    out.push_str("#ifndef LOOKUPA\n#include \"lookupa.h\"\n#endif /* LOOKUPA */\n\n");

    if sizing.blen >= USE_SCRAMBLE {
        out.push_str("/* A way to make the 1-byte values in tab bigger */\n");
        out.push_str(&render_scramble_table(sizing, scramble_table));
        out.push('\n');
    }

    if sizing.blen > 0 {
        out.push_str("/* small adjustments to _a_ to make values distinct */\n");
        out.push_str(&render_tab_table(sizing, solution, scramble_table));
        out.push('\n');
    }

    out.push_str("/* The hash function */\n");
    out.push_str(&render_function(mode, sizing, salt));
    out
}

fn render_scramble_table(sizing: Sizing, scramble_table: &[u32; 256]) -> String {
    let mut out = String::new();
    if sizing.smax > UB2MAXVAL + 1 {
        out.push_str("ub4 scramble[] = {\n");
        for chunk in scramble_table.chunks(4) {
            let line: Vec<String> = chunk.iter().map(|v| format!("0x{v:08x}")).collect();
            out.push_str(&format!("{},\n", line.join(", ")));
        }
    } else {
        out.push_str("ub2 scramble[] = {\n");
        for chunk in scramble_table.chunks(8) {
            let line: Vec<String> = chunk.iter().map(|v| format!("0x{v:04x}")).collect();
            out.push_str(&format!("{},\n", line.join(", ")));
        }
    }
    out.push_str("};\n");
    out
}

fn render_tab_table(sizing: Sizing, solution: &Solution, scramble_table: &[u32; 256]) -> String {
    let width = tab_element_width(sizing);
    let values: Vec<u32> = (0..sizing.blen as usize)
        .map(|b| {
            let val_b = solution.val_b.get(b).copied().unwrap_or(0);
            if sizing.blen >= USE_SCRAMBLE {
                val_b
            } else {
                scramble_table[(val_b & 0xff) as usize]
            }
        })
        .collect();

    let per_line = if sizing.blen < 16 {
        1
    } else if sizing.blen <= 1024 {
        16
    } else if sizing.blen < USE_SCRAMBLE {
        8
    } else {
        16
    };

    let mut out = format!("{width} tab[] = {{\n");
    for chunk in values.chunks(per_line) {
        let line: Vec<String> = chunk.iter().map(|v| v.to_string()).collect();
        out.push_str(&format!("{},\n", line.join(",")));
    }
    out.push_str("};\n");
    out
}

fn render_function(mode: Mode, sizing: Sizing, salt: u32) -> String {
    let a_mask = sizing.alen.saturating_sub(1);
    let b_mask = sizing.blen.saturating_sub(1);
    let phash_salt = salt.wrapping_mul(GOLDEN_RATIO);

    let (signature, mixing) = match mode.hash_kind() {
        HashKind::Str => (
            "ub4 phash(char *key, int len)".to_string(),
            mix_bytes_c(phash_salt),
        ),
        HashKind::Int => (
            "ub4 phash(ub4 val)".to_string(),
            mix_word_c(phash_salt),
        ),
        HashKind::InlineStr => (
            "ub4 phash(ub4 val)".to_string(),
            "  ub4 a = val, b = val;\n".to_string(),
        ),
        HashKind::Ab => (
            "ub4 phash(ub4 a, ub4 b)".to_string(),
            String::new(),
        ),
    };

    let mut body = String::new();
    body.push_str(&signature);
    body.push_str("\n{\n");
    body.push_str(&mixing);

    body.push_str(&format!("  ub4 aa = a & 0x{a_mask:x};\n"));
    if sizing.blen > 0 {
        body.push_str(&format!("  ub4 bb = b & 0x{b_mask:x};\n"));
        body.push_str("  ub4 rsl = aa + tab[bb];\n");
    } else {
        body.push_str("  ub4 rsl = aa;\n");
    }
    // A power-of-two smax (always true for non-minimal hashes; true for
    // minimal ones only when nkeys itself is a power of two) lets the
    // bitmask `tab[]`/solver arithmetic already used; otherwise fall
    // back to `%`, which is what solver::slot_for computes in Rust and
    // must agree with bit-for-bit.
    if sizing.smax.is_power_of_two() {
        let smax_mask = sizing.smax - 1;
        body.push_str(&format!("  rsl &= 0x{smax_mask:x};\n"));
    } else {
        body.push_str(&format!("  rsl %= {};\n", sizing.smax));
    }
    body.push_str("  return rsl;\n");
    body.push_str("}\n");
    body
}

fn mix_bytes_c(phash_salt: u32) -> String {
    format!(
        "  ub4 a, b, c, i;\n\
         a = b = 0x9e3779b9;\n\
         c = 0x{phash_salt:08x};\n\
         i = len;\n\
         while (i >= 12) {{\n\
         \x20\x20a += (key[0] +((ub4)key[1]<<8) +((ub4)key[2]<<16) +((ub4)key[3]<<24));\n\
         \x20\x20b += (key[4] +((ub4)key[5]<<8) +((ub4)key[6]<<16) +((ub4)key[7]<<24));\n\
         \x20\x20c += (key[8] +((ub4)key[9]<<8) +((ub4)key[10]<<16)+((ub4)key[11]<<24));\n\
         \x20\x20mix(a,b,c);\n\
         \x20\x20key += 12; i -= 12;\n\
         }}\n\
         c += len;\n\
         switch(i) {{\n\
         \x20\x20case 11: c+=((ub4)key[10]<<24);\n\
         \x20\x20case 10: c+=((ub4)key[9]<<16);\n\
         \x20\x20case 9 : c+=((ub4)key[8]<<8);\n\
         \x20\x20case 8 : b+=((ub4)key[7]<<24);\n\
         \x20\x20case 7 : b+=((ub4)key[6]<<16);\n\
         \x20\x20case 6 : b+=((ub4)key[5]<<8);\n\
         \x20\x20case 5 : b+=key[4];\n\
         \x20\x20case 4 : a+=((ub4)key[3]<<24);\n\
         \x20\x20case 3 : a+=((ub4)key[2]<<16);\n\
         \x20\x20case 2 : a+=((ub4)key[1]<<8);\n\
         \x20\x20case 1 : a+=key[0];\n\
         }}\n\
         mix(a,b,c);\n"
    )
}

fn mix_word_c(phash_salt: u32) -> String {
    // Mirrors mixer::mix_word, which mixes val's 4 little-endian bytes
    // through mix_bytes: c picks up the 4-byte length before the `a`
    // term is folded in. Drop either line and this no longer agrees
    // bit-for-bit with the (hash_a, hash_b) the chooser computed.
    format!(
        "  ub4 a, b, c;\n\
         a = b = 0x9e3779b9;\n\
         c = 0x{phash_salt:08x};\n\
         c += 4;\n\
         a += val;\n\
         mix(a,b,c);\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Perfect;

    #[test]
    fn header_includes_guard_and_prototype() {
        let sizing = crate::params::size_for(3, Perfect::Minimal);
        let h = render_header(Mode::Normal, sizing, 3, 0);
        assert!(h.contains("#define PHASH"));
        assert!(h.contains("PHASHNKEYS 3"));
        assert!(h.contains("phash(char *key, int len)"));
    }

    #[test]
    fn source_omits_scramble_table_below_threshold() {
        let sizing = crate::params::size_for(3, Perfect::Minimal);
        let solution = Solution { val_b: vec![0; sizing.blen as usize] };
        let table = crate::solver::scramble::build(sizing.smax);
        let src = render_source(Mode::Normal, sizing, &solution, &table, 0);
        assert!(!src.contains("scramble[] = {"));
        assert!(src.contains("tab[] = {"));
    }

    #[test]
    fn ab_mode_signature_takes_two_args() {
        let sizing = crate::params::size_for(4, Perfect::Minimal);
        let src = render_function(Mode::Ab, sizing, 0);
        assert!(src.starts_with("ub4 phash(ub4 a, ub4 b)"));
    }

    #[test]
    fn source_pulls_in_the_mix_macro_from_lookupa() {
        let sizing = crate::params::size_for(3, Perfect::Minimal);
        let solution = Solution { val_b: vec![0; sizing.blen as usize] };
        let table = crate::solver::scramble::build(sizing.smax);
        let src = render_source(Mode::Normal, sizing, &solution, &table, 0);
        assert!(src.contains("#include \"lookupa.h\""));
        assert!(src.contains("mix(a,b,c)"));
    }
}
