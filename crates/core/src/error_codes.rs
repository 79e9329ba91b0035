//! The MetaTrader 4 error-code table.
//!
//! Codes come from the terminal's runtime and trade-server error lists
//! (<https://docs.mql4.com/constants/errorswarnings/errorcodes>). Anything the
//! table does not know resolves to [`ErrorCode::Unknown`].

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

macro_rules! error_codes {
    ($($variant:ident = $id:expr => $name:literal,)+) => {
        /// A MetaTrader 4 error code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $($variant,)+
        }

        impl ErrorCode {
            /// Every known code, ordered by id.
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$variant,)+];

            /// Numeric id as reported by the terminal.
            pub const fn id(self) -> i32 {
                match self {
                    $(ErrorCode::$variant => $id,)+
                }
            }

            /// Symbolic MQL4 name, e.g. `ERR_COMMON_ERROR`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $name,)+
                }
            }
        }
    };
}

error_codes! {
    Unknown = -1 => "UNKNOWN",
    NoError = 0 => "ERR_NO_ERROR",
    NoResult = 1 => "ERR_NO_RESULT",
    CommonError = 2 => "ERR_COMMON_ERROR",
    InvalidTradeParameters = 3 => "ERR_INVALID_TRADE_PARAMETERS",
    ServerBusy = 4 => "ERR_SERVER_BUSY",
    OldVersion = 5 => "ERR_OLD_VERSION",
    NoConnection = 6 => "ERR_NO_CONNECTION",
    NotEnoughRights = 7 => "ERR_NOT_ENOUGH_RIGHTS",
    TooFrequentRequests = 8 => "ERR_TOO_FREQUENT_REQUESTS",
    MalfunctionalTrade = 9 => "ERR_MALFUNCTIONAL_TRADE",
    AccountDisabled = 64 => "ERR_ACCOUNT_DISABLED",
    InvalidAccount = 65 => "ERR_INVALID_ACCOUNT",
    TradeTimeout = 128 => "ERR_TRADE_TIMEOUT",
    InvalidPrice = 129 => "ERR_INVALID_PRICE",
    InvalidStops = 130 => "ERR_INVALID_STOPS",
    InvalidTradeVolume = 131 => "ERR_INVALID_TRADE_VOLUME",
    MarketClosed = 132 => "ERR_MARKET_CLOSED",
    TradeDisabled = 133 => "ERR_TRADE_DISABLED",
    NotEnoughMoney = 134 => "ERR_NOT_ENOUGH_MONEY",
    PriceChanged = 135 => "ERR_PRICE_CHANGED",
    OffQuotes = 136 => "ERR_OFF_QUOTES",
    BrokerBusy = 137 => "ERR_BROKER_BUSY",
    Requote = 138 => "ERR_REQUOTE",
    OrderLocked = 139 => "ERR_ORDER_LOCKED",
    LongPositionsOnlyAllowed = 140 => "ERR_LONG_POSITIONS_ONLY_ALLOWED",
    TooManyRequests = 141 => "ERR_TOO_MANY_REQUESTS",
    TradeModifyDenied = 145 => "ERR_TRADE_MODIFY_DENIED",
    TradeContextBusy = 146 => "ERR_TRADE_CONTEXT_BUSY",
    TradeExpirationDenied = 147 => "ERR_TRADE_EXPIRATION_DENIED",
    TradeTooManyOrders = 148 => "ERR_TRADE_TOO_MANY_ORDERS",
    TradeHedgeProhibited = 149 => "ERR_TRADE_HEDGE_PROHIBITED",
    TradeProhibitedByFifo = 150 => "ERR_TRADE_PROHIBITED_BY_FIFO",
    NoMqlerror = 4000 => "ERR_NO_MQLERROR",
    WrongFunctionPointer = 4001 => "ERR_WRONG_FUNCTION_POINTER",
    ArrayIndexOutOfRange = 4002 => "ERR_ARRAY_INDEX_OUT_OF_RANGE",
    NoMemoryForCallStack = 4003 => "ERR_NO_MEMORY_FOR_CALL_STACK",
    RecursiveStackOverflow = 4004 => "ERR_RECURSIVE_STACK_OVERFLOW",
    NotEnoughStackForParam = 4005 => "ERR_NOT_ENOUGH_STACK_FOR_PARAM",
    NoMemoryForParamString = 4006 => "ERR_NO_MEMORY_FOR_PARAM_STRING",
    NoMemoryForTempString = 4007 => "ERR_NO_MEMORY_FOR_TEMP_STRING",
    NotInitializedString = 4008 => "ERR_NOT_INITIALIZED_STRING",
    NotInitializedArraystring = 4009 => "ERR_NOT_INITIALIZED_ARRAYSTRING",
    NoMemoryForArraystring = 4010 => "ERR_NO_MEMORY_FOR_ARRAYSTRING",
    TooLongString = 4011 => "ERR_TOO_LONG_STRING",
    RemainderFromZeroDivide = 4012 => "ERR_REMAINDER_FROM_ZERO_DIVIDE",
    ZeroDivide = 4013 => "ERR_ZERO_DIVIDE",
    UnknownCommand = 4014 => "ERR_UNKNOWN_COMMAND",
    WrongJump = 4015 => "ERR_WRONG_JUMP",
    NotInitializedArray = 4016 => "ERR_NOT_INITIALIZED_ARRAY",
    DllCallsNotAllowed = 4017 => "ERR_DLL_CALLS_NOT_ALLOWED",
    CannotLoadLibrary = 4018 => "ERR_CANNOT_LOAD_LIBRARY",
    CannotCallFunction = 4019 => "ERR_CANNOT_CALL_FUNCTION",
    ExternalCallsNotAllowed = 4020 => "ERR_EXTERNAL_CALLS_NOT_ALLOWED",
    NoMemoryForReturnedStr = 4021 => "ERR_NO_MEMORY_FOR_RETURNED_STR",
    SystemBusy = 4022 => "ERR_SYSTEM_BUSY",
    DllfuncCriticalerror = 4023 => "ERR_DLLFUNC_CRITICALERROR",
    InternalError = 4024 => "ERR_INTERNAL_ERROR",
    OutOfMemory = 4025 => "ERR_OUT_OF_MEMORY",
    InvalidPointer = 4026 => "ERR_INVALID_POINTER",
    FormatTooManyFormatters = 4027 => "ERR_FORMAT_TOO_MANY_FORMATTERS",
    FormatTooManyParameters = 4028 => "ERR_FORMAT_TOO_MANY_PARAMETERS",
    ArrayInvalid = 4029 => "ERR_ARRAY_INVALID",
    ChartNoreply = 4030 => "ERR_CHART_NOREPLY",
    InvalidFunctionParamscnt = 4050 => "ERR_INVALID_FUNCTION_PARAMSCNT",
    InvalidFunctionParamvalue = 4051 => "ERR_INVALID_FUNCTION_PARAMVALUE",
    StringFunctionInternal = 4052 => "ERR_STRING_FUNCTION_INTERNAL",
    SomeArrayError = 4053 => "ERR_SOME_ARRAY_ERROR",
    IncorrectSeriesarrayUsing = 4054 => "ERR_INCORRECT_SERIESARRAY_USING",
    CustomIndicatorError = 4055 => "ERR_CUSTOM_INDICATOR_ERROR",
    IncompatibleArrays = 4056 => "ERR_INCOMPATIBLE_ARRAYS",
    GlobalVariablesProcessing = 4057 => "ERR_GLOBAL_VARIABLES_PROCESSING",
    GlobalVariableNotFound = 4058 => "ERR_GLOBAL_VARIABLE_NOT_FOUND",
    FuncNotAllowedInTesting = 4059 => "ERR_FUNC_NOT_ALLOWED_IN_TESTING",
    FunctionNotConfirmed = 4060 => "ERR_FUNCTION_NOT_CONFIRMED",
    SendMailError = 4061 => "ERR_SEND_MAIL_ERROR",
    StringParameterExpected = 4062 => "ERR_STRING_PARAMETER_EXPECTED",
    IntegerParameterExpected = 4063 => "ERR_INTEGER_PARAMETER_EXPECTED",
    DoubleParameterExpected = 4064 => "ERR_DOUBLE_PARAMETER_EXPECTED",
    ArrayAsParameterExpected = 4065 => "ERR_ARRAY_AS_PARAMETER_EXPECTED",
    HistoryWillUpdated = 4066 => "ERR_HISTORY_WILL_UPDATED",
    TradeError = 4067 => "ERR_TRADE_ERROR",
    ResourceNotFound = 4068 => "ERR_RESOURCE_NOT_FOUND",
    ResourceNotSupported = 4069 => "ERR_RESOURCE_NOT_SUPPORTED",
    ResourceDuplicated = 4070 => "ERR_RESOURCE_DUPLICATED",
    IndicatorCannotInit = 4071 => "ERR_INDICATOR_CANNOT_INIT",
    IndicatorCannotLoad = 4072 => "ERR_INDICATOR_CANNOT_LOAD",
    NoHistoryData = 4073 => "ERR_NO_HISTORY_DATA",
    NoMemoryForHistory = 4074 => "ERR_NO_MEMORY_FOR_HISTORY",
    NoMemoryForIndicator = 4075 => "ERR_NO_MEMORY_FOR_INDICATOR",
    EndOfFile = 4099 => "ERR_END_OF_FILE",
    SomeFileError = 4100 => "ERR_SOME_FILE_ERROR",
    WrongFileName = 4101 => "ERR_WRONG_FILE_NAME",
    TooManyOpenedFiles = 4102 => "ERR_TOO_MANY_OPENED_FILES",
    CannotOpenFile = 4103 => "ERR_CANNOT_OPEN_FILE",
    IncompatibleFileaccess = 4104 => "ERR_INCOMPATIBLE_FILEACCESS",
    NoOrderSelected = 4105 => "ERR_NO_ORDER_SELECTED",
    UnknownSymbol = 4106 => "ERR_UNKNOWN_SYMBOL",
    InvalidPriceParam = 4107 => "ERR_INVALID_PRICE_PARAM",
    InvalidTicket = 4108 => "ERR_INVALID_TICKET",
    TradeNotAllowed = 4109 => "ERR_TRADE_NOT_ALLOWED",
    LongsNotAllowed = 4110 => "ERR_LONGS_NOT_ALLOWED",
    ShortsNotAllowed = 4111 => "ERR_SHORTS_NOT_ALLOWED",
    TradeExpertDisabledByServer = 4112 => "ERR_TRADE_EXPERT_DISABLED_BY_SERVER",
    ObjectAlreadyExists = 4200 => "ERR_OBJECT_ALREADY_EXISTS",
    UnknownObjectProperty = 4201 => "ERR_UNKNOWN_OBJECT_PROPERTY",
    ObjectDoesNotExist = 4202 => "ERR_OBJECT_DOES_NOT_EXIST",
    UnknownObjectType = 4203 => "ERR_UNKNOWN_OBJECT_TYPE",
    NoObjectName = 4204 => "ERR_NO_OBJECT_NAME",
    ObjectCoordinatesError = 4205 => "ERR_OBJECT_COORDINATES_ERROR",
    NoSpecifiedSubwindow = 4206 => "ERR_NO_SPECIFIED_SUBWINDOW",
    SomeObjectError = 4207 => "ERR_SOME_OBJECT_ERROR",
    ChartPropInvalid = 4210 => "ERR_CHART_PROP_INVALID",
    ChartNotFound = 4211 => "ERR_CHART_NOT_FOUND",
    ChartwindowNotFound = 4212 => "ERR_CHARTWINDOW_NOT_FOUND",
    ChartindicatorNotFound = 4213 => "ERR_CHARTINDICATOR_NOT_FOUND",
    SymbolSelect = 4220 => "ERR_SYMBOL_SELECT",
    NotificationError = 4250 => "ERR_NOTIFICATION_ERROR",
    NotificationParameter = 4251 => "ERR_NOTIFICATION_PARAMETER",
    NotificationSettings = 4252 => "ERR_NOTIFICATION_SETTINGS",
    NotificationTooFrequent = 4253 => "ERR_NOTIFICATION_TOO_FREQUENT",
    FtpNoserver = 4260 => "ERR_FTP_NOSERVER",
    FtpNologin = 4261 => "ERR_FTP_NOLOGIN",
    FtpConnectFailed = 4262 => "ERR_FTP_CONNECT_FAILED",
    FtpClosed = 4263 => "ERR_FTP_CLOSED",
    FtpChangedir = 4264 => "ERR_FTP_CHANGEDIR",
    FtpFileError = 4265 => "ERR_FTP_FILE_ERROR",
    FtpError = 4266 => "ERR_FTP_ERROR",
    FileTooManyOpened = 5001 => "ERR_FILE_TOO_MANY_OPENED",
    FileWrongFilename = 5002 => "ERR_FILE_WRONG_FILENAME",
    FileTooLongFilename = 5003 => "ERR_FILE_TOO_LONG_FILENAME",
    FileCannotOpen = 5004 => "ERR_FILE_CANNOT_OPEN",
    FileBufferAllocationError = 5005 => "ERR_FILE_BUFFER_ALLOCATION_ERROR",
    FileCannotDelete = 5006 => "ERR_FILE_CANNOT_DELETE",
    FileInvalidHandle = 5007 => "ERR_FILE_INVALID_HANDLE",
    FileWrongHandle = 5008 => "ERR_FILE_WRONG_HANDLE",
    FileNotTowrite = 5009 => "ERR_FILE_NOT_TOWRITE",
    FileNotToread = 5010 => "ERR_FILE_NOT_TOREAD",
    FileNotBin = 5011 => "ERR_FILE_NOT_BIN",
    FileNotTxt = 5012 => "ERR_FILE_NOT_TXT",
    FileNotTxtorcsv = 5013 => "ERR_FILE_NOT_TXTORCSV",
    FileNotCsv = 5014 => "ERR_FILE_NOT_CSV",
    FileReadError = 5015 => "ERR_FILE_READ_ERROR",
    FileWriteError = 5016 => "ERR_FILE_WRITE_ERROR",
    FileBinStringsize = 5017 => "ERR_FILE_BIN_STRINGSIZE",
    FileIncompatible = 5018 => "ERR_FILE_INCOMPATIBLE",
    FileIsDirectory = 5019 => "ERR_FILE_IS_DIRECTORY",
    FileNotExist = 5020 => "ERR_FILE_NOT_EXIST",
    FileCannotRewrite = 5021 => "ERR_FILE_CANNOT_REWRITE",
    FileWrongDirectoryname = 5022 => "ERR_FILE_WRONG_DIRECTORYNAME",
    FileDirectoryNotExist = 5023 => "ERR_FILE_DIRECTORY_NOT_EXIST",
    FileNotDirectory = 5024 => "ERR_FILE_NOT_DIRECTORY",
    FileCannotDeleteDirectory = 5025 => "ERR_FILE_CANNOT_DELETE_DIRECTORY",
    FileCannotCleanDirectory = 5026 => "ERR_FILE_CANNOT_CLEAN_DIRECTORY",
    FileArrayresizeError = 5027 => "ERR_FILE_ARRAYRESIZE_ERROR",
    FileStringresizeError = 5028 => "ERR_FILE_STRINGRESIZE_ERROR",
    FileStructWithObjects = 5029 => "ERR_FILE_STRUCT_WITH_OBJECTS",
    WebrequestInvalidAddress = 5200 => "ERR_WEBREQUEST_INVALID_ADDRESS",
    WebrequestConnectFailed = 5201 => "ERR_WEBREQUEST_CONNECT_FAILED",
    WebrequestTimeout = 5202 => "ERR_WEBREQUEST_TIMEOUT",
    WebrequestRequestFailed = 5203 => "ERR_WEBREQUEST_REQUEST_FAILED",
    UserErrorFirst = 65536 => "ERR_USER_ERROR_FIRST",
}

static BY_ID: LazyLock<HashMap<i64, ErrorCode>> = LazyLock::new(|| {
    ErrorCode::ALL
        .iter()
        .map(|code| (i64::from(code.id()), *code))
        .collect()
});

impl ErrorCode {
    /// Look up a code by id without logging.
    pub fn lookup(id: i64) -> Option<ErrorCode> {
        BY_ID.get(&id).copied()
    }

    /// Resolve a reported id, falling back to [`ErrorCode::Unknown`].
    pub fn resolve(id: i64) -> ErrorCode {
        match Self::lookup(id) {
            Some(code) => code,
            None => {
                tracing::error!(code = id, "Unknown error code: {}", id);
                ErrorCode::Unknown
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_every_known_code_resolves_to_itself() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::resolve(i64::from(code.id())), *code);
        }
    }

    #[test]
    fn test_table_ids_are_unique_and_sorted() {
        let ids: Vec<i32> = ErrorCode::ALL.iter().map(|c| c.id()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(BY_ID.len(), ErrorCode::ALL.len());
    }

    #[rstest]
    #[case(10)]
    #[case(4031)]
    #[case(-2)]
    #[case(99_999)]
    fn test_unknown_ids_fall_back(#[case] id: i64) {
        assert_eq!(ErrorCode::lookup(id), None);
        assert_eq!(ErrorCode::resolve(id), ErrorCode::Unknown);
    }

    #[rstest]
    #[case(2, ErrorCode::CommonError, "ERR_COMMON_ERROR")]
    #[case(4, ErrorCode::ServerBusy, "ERR_SERVER_BUSY")]
    #[case(64, ErrorCode::AccountDisabled, "ERR_ACCOUNT_DISABLED")]
    #[case(4108, ErrorCode::InvalidTicket, "ERR_INVALID_TICKET")]
    #[case(65536, ErrorCode::UserErrorFirst, "ERR_USER_ERROR_FIRST")]
    fn test_known_ids(#[case] id: i64, #[case] expected: ErrorCode, #[case] name: &str) {
        let code = ErrorCode::resolve(id);
        assert_eq!(code, expected);
        assert_eq!(code.to_string(), name);
    }
}
