use crate::model::well::Channel;

/// Placeholder channel key for tests whose target is not tied to a channel.
pub const UNSPECIFIED: Option<Channel> = None;

#[derive(Debug, Clone, Copy)]
pub struct TargetDef {
    pub test_code: &'static str,
    pub targets: &'static [(Option<Channel>, &'static str)],
}

const BUILTIN_TARGETS: &[TargetDef] = &[
    TargetDef {
        test_code: "Lacto",
        targets: &[
            (Some(Channel::Cy5), "Lactobacillus jenseni"),
            (Some(Channel::Fam), "Lactobacillus gasseri"),
            (Some(Channel::Hex), "Lactobacillus iners"),
            (Some(Channel::TexasRed), "Lactobacillus crispatus"),
        ],
    },
    TargetDef {
        test_code: "Calb",
        targets: &[
            (Some(Channel::Hex), "Candida albicans"),
        ],
    },
    TargetDef {
        test_code: "Ctrach",
        targets: &[
            (Some(Channel::Fam), "Chlamydia trachomatis"),
        ],
    },
    TargetDef {
        test_code: "Ngon",
        targets: &[
            (Some(Channel::Hex), "Neisseria gonhorrea"),
        ],
    },
    TargetDef {
        test_code: "Tvag",
        targets: &[
            (Some(Channel::Fam), "Trichomonas vaginalis"),
        ],
    },
    TargetDef {
        test_code: "Cglab",
        targets: &[
            (Some(Channel::Fam), "Candida glabrata"),
        ],
    },
    TargetDef {
        test_code: "Cpara",
        targets: &[
            (Some(Channel::Fam), "Candida parapsilosis"),
        ],
    },
    TargetDef {
        test_code: "Ctrop",
        targets: &[
            (Some(Channel::Fam), "Candida tropicalis"),
        ],
    },
    TargetDef {
        test_code: "Gvag",
        targets: &[
            (Some(Channel::Fam), "Gardnerella vaginalis"),
        ],
    },
    TargetDef {
        test_code: "BVAB2",
        targets: &[
            (Some(Channel::Fam), "BVAB2"),
        ],
    },
    TargetDef {
        test_code: "CHVIC",
        targets: &[
            (Some(Channel::Fam), "CHVIC"),
        ],
    },
    TargetDef {
        test_code: "AtopVag",
        targets: &[
            (Some(Channel::Fam), "Atopobium vaginae"),
        ],
    },
    TargetDef {
        test_code: "Megasphaera",
        targets: &[
            (Some(Channel::Fam), "Megasphaera1"),
            (Some(Channel::Hex), "Megasphaera2"),
        ],
    },
    TargetDef {
        test_code: "Efaecalis",
        targets: &[
            (Some(Channel::Fam), "Enterococcus faecaelis"),
        ],
    },
    TargetDef {
        test_code: "Saureus",
        targets: &[
            (Some(Channel::Fam), "Staphylococcus aureus"),
        ],
    },
    TargetDef {
        test_code: "Ecoli",
        targets: &[
            (Some(Channel::Fam), "Escherichia coli"),
        ],
    },
    TargetDef {
        test_code: "AtopVagNY",
        targets: &[
            (Some(Channel::Fam), "Atopobium vaginae"),
        ],
    },
    TargetDef {
        test_code: "BVAB2NY",
        targets: &[
            (Some(Channel::Fam), "BVAB2"),
        ],
    },
    TargetDef {
        test_code: "GvagNY",
        targets: &[
            (Some(Channel::Fam), "Gardnerella vaginalis"),
        ],
    },
    TargetDef {
        test_code: "MegasphaeraNY",
        targets: &[
            (Some(Channel::Fam), "MegasphaeraNY1"),
            (Some(Channel::Hex), "MegasphaeraNY2"),
        ],
    },
    TargetDef {
        test_code: "LactoNY",
        targets: &[
            (Some(Channel::Cy5), "Lactobacillus jenseni"),
            (Some(Channel::Fam), "Lactobacillus gasseri"),
            (Some(Channel::Hex), "Lactobacillus iners"),
            (Some(Channel::TexasRed), "Lactobacillus crispatus"),
        ],
    },
    TargetDef {
        test_code: "RNaseP",
        targets: &[
            (Some(Channel::Hex), "Ribonuclease P"),
        ],
    },
    TargetDef {
        test_code: "HPVNGS1",
        targets: &[
            (UNSPECIFIED, "HPVNGS1"),
        ],
    },
    TargetDef {
        test_code: "HPVNGS2",
        targets: &[
            (Some(Channel::Fam), "HPVNGS2"),
            (Some(Channel::Hex), "HPVNGS2"),
        ],
    },
    TargetDef {
        test_code: "HPVNGS3",
        targets: &[
            (UNSPECIFIED, "HPVNGS3"),
        ],
    },
    TargetDef {
        test_code: "GBS",
        targets: &[
            (Some(Channel::Fam), "Group B Strep"),
        ],
    },
    TargetDef {
        test_code: "GBSEnrich",
        targets: &[
            (Some(Channel::Fam), "GBS Enrich"),
        ],
    },
    TargetDef {
        test_code: "GBSNY",
        targets: &[
            (Some(Channel::Fam), "GBS NY"),
        ],
    },
    TargetDef {
        test_code: "GBSEnrichNY",
        targets: &[
            (Some(Channel::Fam), "GBS Enrich NY"),
        ],
    },
    TargetDef {
        test_code: "COVIDN1NY",
        targets: &[
            (Some(Channel::Fam), "Unknown"),
        ],
    },
    TargetDef {
        test_code: "COVIDN2NY",
        targets: &[
            (Some(Channel::Fam), "Unknown"),
        ],
    },
    TargetDef {
        test_code: "COVIDHRPP30NY",
        targets: &[
            (Some(Channel::Fam), "Unknown"),
        ],
    },
    TargetDef {
        test_code: "COVID19NY",
        targets: &[
            (Some(Channel::Fam), "Unknown"),
        ],
    },
    TargetDef {
        test_code: "FLUAB",
        targets: &[
            (Some(Channel::Cy5), "Influenza A"),
            (Some(Channel::Fam), "Influenza B"),
        ],
    },
    TargetDef {
        test_code: "InfluenzaA",
        targets: &[
            (Some(Channel::Cy5), "Influenza A"),
        ],
    },
    TargetDef {
        test_code: "InfluenzaB",
        targets: &[
            (Some(Channel::Fam), "Influenza B"),
        ],
    },
    TargetDef {
        test_code: "HPV1",
        targets: &[
            (Some(Channel::Fam), "HPV16"),
            (Some(Channel::Hex), "HPV58"),
            (Some(Channel::TexasRed), "HPV18"),
            (Some(Channel::Cy5), "HPV45"),
        ],
    },
    TargetDef {
        test_code: "HPV2",
        targets: &[
            (Some(Channel::Fam), "HPV51"),
            (Some(Channel::Hex), "HPV52"),
            (Some(Channel::Cy5), "HPV35"),
        ],
    },
    TargetDef {
        test_code: "HPV3",
        targets: &[
            (Some(Channel::Fam), "HPV31"),
            (Some(Channel::Hex), "HPV39"),
            (Some(Channel::TexasRed), "HPV56"),
            (Some(Channel::Cy5), "HPVBG"),
        ],
    },
    TargetDef {
        test_code: "HPV4",
        targets: &[
            (Some(Channel::Fam), "HPV59"),
            (Some(Channel::Hex), "HPV33"),
            (Some(Channel::TexasRed), "HPV68"),
        ],
    },
    TargetDef {
        test_code: "Mgen",
        targets: &[
            (Some(Channel::Fam), "Mycoplasma genitalium"),
        ],
    },
    TargetDef {
        test_code: "NOVNOV",
        targets: &[
            (Some(Channel::Fam), "NOVNOV"),
        ],
    },
    TargetDef {
        test_code: "NOVRP",
        targets: &[
            (Some(Channel::Fam), "NOVRP"),
        ],
    },
    TargetDef {
        test_code: "NOV",
        targets: &[
            (Some(Channel::Fam), "NOV"),
        ],
    },
    TargetDef {
        test_code: "Ckrus",
        targets: &[
            (Some(Channel::Fam), "Ckrus"),
        ],
    },
    TargetDef {
        test_code: "BVPanelPCR1",
        targets: &[
            (Some(Channel::Fam), "Bacteroides fragilis"),
            (Some(Channel::Hex), "Mobiluncus curtisii"),
            (Some(Channel::TexasRed), "Streptococcus anginosus"),
            (Some(Channel::Cy5), "Sneathia sanguinegens"),
        ],
    },
    TargetDef {
        test_code: "BVPanelPCR2",
        targets: &[
            (Some(Channel::Fam), "Atopobium vaginae"),
            (Some(Channel::Hex), "Mobiluncus mulieris"),
            (Some(Channel::TexasRed), "Megasphaera type 2"),
            (Some(Channel::Cy5), "Megasphaera type 1"),
        ],
    },
    TargetDef {
        test_code: "BVPanelPCR3",
        targets: &[
            (Some(Channel::Fam), "Gardnerella vaginalis"),
            (Some(Channel::Hex), "Lactobacillus acidophilus"),
            (Some(Channel::TexasRed), "Prevotella bivia"),
            (Some(Channel::Cy5), "Bifidobacterium breve"),
        ],
    },
    TargetDef {
        test_code: "BVPanelPCR4",
        targets: &[
            (Some(Channel::Fam), "Gardnerella vaginalis"),
            (Some(Channel::Hex), "Lactobacillus acidophilus"),
            (Some(Channel::TexasRed), "Prevotella bivia"),
            (Some(Channel::Cy5), "Bifidobacterium breve"),
        ],
    },
    TargetDef {
        test_code: "BVAB",
        targets: &[
            (Some(Channel::Fam), "BVAB2"),
            (Some(Channel::Hex), "BVAB1"),
            (Some(Channel::Cy5), "BVAB3"),
        ],
    },
    TargetDef {
        test_code: "BifidoBreve",
        targets: &[
            (Some(Channel::Cy5), "BifidoBreve"),
        ],
    },
    TargetDef {
        test_code: "LactoAcido",
        targets: &[
            (Some(Channel::Hex), "LactoAcido"),
        ],
    },
    TargetDef {
        test_code: "MobiCurti",
        targets: &[
            (Some(Channel::Hex), "MobiCurti"),
        ],
    },
    TargetDef {
        test_code: "SneSangu",
        targets: &[
            (Some(Channel::Cy5), "SneSangu"),
        ],
    },
    TargetDef {
        test_code: "PrevoBivia",
        targets: &[
            (Some(Channel::TexasRed), "PrevoBivia"),
        ],
    },
    TargetDef {
        test_code: "MobiMuli",
        targets: &[
            (Some(Channel::Hex), "MobiMuli"),
        ],
    },
    TargetDef {
        test_code: "StrepAngi",
        targets: &[
            (Some(Channel::Fam), "StrepAngi"),
        ],
    },
    TargetDef {
        test_code: "HPV1NY",
        targets: &[
            (Some(Channel::Fam), "HPV16"),
            (Some(Channel::Hex), "HPV58"),
            (Some(Channel::TexasRed), "HPV18"),
            (Some(Channel::Cy5), "HPV45"),
        ],
    },
    TargetDef {
        test_code: "HPV2NY",
        targets: &[
            (Some(Channel::Fam), "HPV51"),
            (Some(Channel::Hex), "HPV52"),
            (Some(Channel::Cy5), "HPV35"),
        ],
    },
    TargetDef {
        test_code: "HPV3NY",
        targets: &[
            (Some(Channel::Fam), "HPV31"),
            (Some(Channel::Hex), "HPV39"),
            (Some(Channel::TexasRed), "HPV56"),
            (Some(Channel::Cy5), "HPVBG"),
        ],
    },
    TargetDef {
        test_code: "HPV4NY",
        targets: &[
            (Some(Channel::Fam), "HPV59"),
            (Some(Channel::Hex), "HPV33"),
            (Some(Channel::TexasRed), "HPV68"),
        ],
    },
    TargetDef {
        test_code: "BVPanelPCR1NY",
        targets: &[
            (Some(Channel::Fam), "Bacteroides fragilis"),
            (Some(Channel::Hex), "Mobiluncus curtisii"),
            (Some(Channel::TexasRed), "Streptococcus anginosus"),
            (Some(Channel::Cy5), "Sneathia sanguinegens"),
        ],
    },
    TargetDef {
        test_code: "BVPanelPCR2NY",
        targets: &[
            (Some(Channel::Fam), "Atopobium vaginae"),
            (Some(Channel::Hex), "Mobiluncus mulieris"),
            (Some(Channel::TexasRed), "Megasphaera type 2"),
            (Some(Channel::Cy5), "Megasphaera type 1"),
        ],
    },
    TargetDef {
        test_code: "BVPanelPCR3NY",
        targets: &[
            (Some(Channel::Fam), "Gardnerella vaginalis"),
            (Some(Channel::Hex), "Lactobacillus acidophilus"),
            (Some(Channel::TexasRed), "Prevotella bivia"),
            (Some(Channel::Cy5), "Bifidobacterium breve"),
        ],
    },
    TargetDef {
        test_code: "BVABNY",
        targets: &[
            (Some(Channel::Fam), "BVAB2"),
            (Some(Channel::Hex), "BVAB1"),
            (Some(Channel::Cy5), "BVAB3"),
        ],
    },
    TargetDef {
        test_code: "BifidoBreveNY",
        targets: &[
            (Some(Channel::Cy5), "BifidoBreve"),
        ],
    },
    TargetDef {
        test_code: "LactoAcidoNY",
        targets: &[
            (Some(Channel::Hex), "LactoAcido"),
        ],
    },
    TargetDef {
        test_code: "MobiCurtiNY",
        targets: &[
            (Some(Channel::Hex), "MobiCurti"),
        ],
    },
    TargetDef {
        test_code: "SneSanguNY",
        targets: &[
            (Some(Channel::Cy5), "SneSangu"),
        ],
    },
    TargetDef {
        test_code: "PrevoBiviaNY",
        targets: &[
            (Some(Channel::TexasRed), "PrevoBivia"),
        ],
    },
    TargetDef {
        test_code: "MobiMuliNY",
        targets: &[
            (Some(Channel::Hex), "MobiMuli"),
        ],
    },
    TargetDef {
        test_code: "StrepAngiNY",
        targets: &[
            (Some(Channel::Fam), "StrepAngi"),
        ],
    },
    TargetDef {
        test_code: "BVPanelMega2NY",
        targets: &[
            (Some(Channel::TexasRed), "Megasphaera type 2"),
        ],
    },
    TargetDef {
        test_code: "BVPanelMega2",
        targets: &[
            (Some(Channel::TexasRed), "Megasphaera type 2"),
        ],
    },
    TargetDef {
        test_code: "Upar",
        targets: &[
            (Some(Channel::Fam), "Ureaplasma parvum"),
        ],
    },
    TargetDef {
        test_code: "Uure",
        targets: &[
            (Some(Channel::Fam), "Ureaplasma urealyticum"),
        ],
    },
];

pub fn builtin_targets() -> &'static [TargetDef] {
    BUILTIN_TARGETS
}
