//! Utilities for upgrading old ID3v2 frame IDs

macro_rules! gen_upgrades {
	($($v2_id:literal => $v3_id:literal),+ $(,)?) => {
		/// Upgrade an ID3v2.2 frame ID to its ID3v2.3 equivalent
		///
		/// IDs without an equivalent (including all 4 character IDs) are returned as-is.
		///
		/// # Examples
		///
		/// ```rust
		/// use mp3info::id3::v2::util::upgrade::upgrade_v2;
		///
		/// assert_eq!(upgrade_v2("TT2"), "TIT2");
		/// assert_eq!(upgrade_v2("TIT2"), "TIT2");
		/// assert_eq!(upgrade_v2("XYZ"), "XYZ");
		/// ```
		pub fn upgrade_v2(key: &str) -> &str {
			match key {
				$($v2_id => $v3_id,)+
				_ => key,
			}
		}
	};
}

gen_upgrades!(
	"BUF" => "RBUF",
	"COM" => "COMM",
	"CRA" => "AENC",
	"EQU" => "EQUA",
	"ETC" => "ETCO",
	"GEO" => "GEOB",
	"MCI" => "MCDI",
	"MLL" => "MLLT",
	"PIC" => "APIC",
	"POP" => "POPM",
	"REV" => "RVRB",
	"RVA" => "RVAD",
	"SLT" => "SYLT",
	"STC" => "SYTC",
	"TAL" => "TALB",
	"TBP" => "TBPM",
	"TCM" => "TCOM",
	"TCO" => "TCON",
	"TCR" => "TCOP",
	"TDA" => "TDAT",
	"TDY" => "TDLY",
	"TEN" => "TENC",
	"TFT" => "TFLT",
	"TIM" => "TIME",
	"TKE" => "TKEY",
	"TLA" => "TLAN",
	"TLE" => "TLEN",
	"TMT" => "TMED",
	"TOA" => "TOPE",
	"TOF" => "TOFN",
	"TOL" => "TOLY",
	"TOR" => "TORY",
	"TOT" => "TOAL",
	"TP1" => "TPE1",
	"TP2" => "TPE2",
	"TP3" => "TPE3",
	"TP4" => "TPE4",
	"TPA" => "TPOS",
	"TPB" => "TPUB",
	"TRC" => "TSRC",
	"TRD" => "TRDA",
	"TRK" => "TRCK",
	"TSI" => "TSIZ",
	"TSS" => "TSSE",
	"TT1" => "TIT1",
	"TT2" => "TIT2",
	"TT3" => "TIT3",
	"TXT" => "TEXT",
	"TXX" => "TXXX",
	"TYE" => "TYER",
	"UFI" => "UFID",
	"ULT" => "USLT",
	"WAF" => "WOAF",
	"WAR" => "WOAR",
	"WAS" => "WOAS",
	"WCM" => "WCOM",
	"WCP" => "WCOP",
	"WXX" => "WXXX",
);
