// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, trie};
use std::sync::Arc;

// Enough to keep a bot playing when the real word list is missing.
static FALLBACK_WORDS: &str = "\
AA AB AD AE AG AH AI AL AM AN AR AS AT AW AX AY BA BE BI BO BY DA DE DO ED EF EH EL EM EN ER ES EX \
FA FE GO HA HE HI HM HO ID IF IN IS IT JO KA KI LA LI LO MA ME MI MO MU MY NA NE NO NU OD OE OF \
OH OI OM ON OP OR OS OW OX OY PA PE PI QI RE SH SI SO TA TI TO UH UM UN UP US UT WE WO XI XU YA \
YE YO ZA ACE ACT ADD AGE AGO AID AIM AIR ALE ALL AND ANT ANY APE ARC ARE ARM ART ASH ASK ATE AXE \
BAD BAG BAN BAR BAT BED BEE BET BIG BIN BIT BOA BOG BOX BOY BUD BUG BUN BUS BUT BUY CAB CAN CAP \
CAR CAT COB COD COG CON COT COW COY CRY CUB CUD CUE CUP CUT DAB DAD DAM DAY DEN DEW DID DIE DIG \
DIM DIN DIP DOE DOG DON DOT DRY DUE DUG DYE EAR EAT EEL EGG ELF ELK ELM END ERA EVE EWE EYE FAN \
FAR FAT FAX FED FEE FEW FIG FIN FIR FIT FIX FLY FOE FOG FOR FOX FRY FUN FUR GAP GAS GEL GEM GET \
GIN GOD GOT GUM GUN GUT GUY HAD HAM HAS HAT HAY HEN HER HEY HID HIM HIP HIS HIT HOE HOG HOP HOT \
HOW HUB HUE HUG HUT ICE ILL INK INN ION IRE IRK ITS IVY JAB JAM JAR JAW JAY JET JIG JOB JOG JOT \
JOY JUG KEG KEY KID KIN KIT LAB LAD LAG LAP LAW LAY LED LEG LET LID LIE LIP LIT LOG LOT LOW MAD \
MAN MAP MAT MAX MAY MEN MET MID MIX MOB MOM MOP MUD MUG NAB NAG NAP NET NEW NIB NIT NOD NOR NOT \
NOW NUN NUT OAK OAR OAT ODD ODE OFF OFT OIL OLD ONE OPT ORB ORE OUR OUT OWE OWL OWN PAD PAL PAN \
PAT PAW PAY PEA PEG PEN PET PIE PIG PIN PIT POD POT PRY PUB PUN PUT QAT RAG RAM RAN RAP RAT RAW \
RAY RED RIB RID RIG RIM RIP ROB ROD ROE ROT ROW RUB RUG RUN RUT RYE SAD SAG SAP SAT SAW SAY SEA \
SET SEW SHE SHY SIN SIP SIR SIT SIX SKI SKY SLY SOB SOD SON SOW SOY SPA SPY STY SUB SUM SUN SUQ \
TAB TAG TAN TAP TAR TAX TEA TEE TEN THE TIE TIN TIP TOE TON TOO TOP TOW TOY TRY TUB TUG TWO URN \
USE VAN VAT VET VEX VIA VIE VOW WAD WAG WAR WAS WAX WAY WEB WED WET WHO WHY WIG WIN WIT WOE WOK \
WON WOO WOW YAK YAM YAP YES YET YEW YOU ZAP ZED ZEE ZEN ZIP ZOO \
CATS DOGS RATE TEAR TIRE RITE NOTE TONE STAR RATS ARTS QUIT QUIZ JAZZ ZEST AXES EXIT TAXI ";

pub fn fallback_words() -> impl Iterator<Item = &'static str> {
    FALLBACK_WORDS.split_ascii_whitespace()
}

pub fn fallback_lexicon() -> Arc<trie::Trie> {
    Arc::new(trie::Trie::build(fallback_words()))
}

// One word per line. Lines that are not plain letters are skipped.
pub fn lexicon_from_text(text: &str) -> trie::Trie {
    trie::Trie::build(text.lines())
}

// A missing or empty word list is replaced by the fallback list, with a
// warning. Any other failure to read the file is an error.
pub fn load_lexicon<P: AsRef<std::path::Path>>(path: P) -> error::Returns<Arc<trie::Trie>> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let trie = lexicon_from_text(&text);
            if trie.is_empty() {
                eprintln!(
                    "warning: word list {:?} has no usable words, using built-in fallback",
                    path
                );
                Ok(fallback_lexicon())
            } else {
                Ok(Arc::new(trie))
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            eprintln!(
                "warning: word list {:?} not found, using built-in fallback",
                path
            );
            Ok(fallback_lexicon())
        }
        Err(err) => {
            return_error!(format!("cannot read word list {:?}: {}", path, err));
        }
    }
}
