use bitflags::bitflags;

bitflags! {
    /// Properties of the (sub-)matrix a solver node works on.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MatProps: u8 {
        const SYMMETRIC         = 0b001;
        const POSITIVE_DEFINITE = 0b010;
        const BLOCK_STRUCTURED  = 0b100; // logically block structured
        const SPD               = Self::SYMMETRIC.bits() | Self::POSITIVE_DEFINITE.bits();
    }
}

impl MatProps {
    pub fn new(symmetric: bool, positive_definite: bool, block_structured: bool) -> Self {
        let mut p = MatProps::empty();
        p.set(MatProps::SYMMETRIC, symmetric);
        p.set(MatProps::POSITIVE_DEFINITE, positive_definite);
        p.set(MatProps::BLOCK_STRUCTURED, block_structured);
        p
    }

    pub fn symmetric(self) -> bool { self.contains(MatProps::SYMMETRIC) }
    pub fn positive_definite(self) -> bool { self.contains(MatProps::POSITIVE_DEFINITE) }
    pub fn block_structured(self) -> bool { self.contains(MatProps::BLOCK_STRUCTURED) }
    pub fn is_spd(self) -> bool { self.contains(MatProps::SPD) }

    /// Positive definite implies symmetric.
    pub fn is_consistent(self) -> bool {
        !self.positive_definite() || self.symmetric()
    }

    /// The first property `parent` asserts that `self` drops, if any.
    /// Block structure is not inherited this way.
    pub fn missing_from_parent(self, parent: MatProps) -> Option<&'static str> {
        if parent.symmetric() && !self.symmetric() {
            Some("symmetric")
        } else if parent.positive_definite() && !self.positive_definite() {
            Some("positive definite")
        } else {
            None
        }
    }

    pub fn satisfies_parent(self, parent: MatProps) -> bool {
        self.missing_from_parent(parent).is_none()
    }

    /// Flags a freshly synthesized child receives.
    pub fn inherited(self, keep_block_structure: bool) -> MatProps {
        if keep_block_structure { self } else { self - MatProps::BLOCK_STRUCTURED }
    }

    /// `self` raised to at least the symmetric/positive-definite flags of `parent`.
    pub fn strengthened_by(self, parent: MatProps) -> MatProps {
        self | (parent & MatProps::SPD)
    }
}
