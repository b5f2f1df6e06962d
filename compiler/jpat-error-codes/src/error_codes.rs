//! jpat error code definitions.

error_codes! {
    // Exhaustiveness
    NotExhaustive = 1 => "not.exhaustive",
    NotExhaustiveStatement = 2 => "not.exhaustive.statement",

    // Case labels
    PatternDominated = 10 => "pattern.dominated",
    GuardConstantFalse = 11 => "guard.has.constant.expression.false",
    DuplicateCaseLabel = 12 => "duplicate.case.label",
    DuplicateDefaultLabel = 13 => "duplicate.default.label",
    UnconditionalPatternAndDefault = 14 => "unconditional.pattern.and.default",

    // Workspace loading
    UnknownType = 20 => "cant.resolve.type",
    DuplicateType = 21 => "already.defined.type",
    InvalidPattern = 22 => "invalid.pattern",
    InvalidPermits = 23 => "invalid.permits.clause",
}
